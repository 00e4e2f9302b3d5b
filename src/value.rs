//! Rendering of field values into failure messages.
//!
//! A failing value shows up twice in a [`ValidationErrorDetail`](crate::ValidationErrorDetail):
//! substituted for the `{value}` placeholder of the message and as the
//! `actual_value`. [`FieldValue`] decides what that string is.

/// Placeholder token substituted with the failing value in a hint.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// A value that can be rendered into a validation failure.
///
/// `render` returns `None` for absent values, which are reported as the
/// literal `"null"`.
///
/// # Example
///
/// ```rust
/// use fieldwise::FieldValue;
///
/// assert_eq!(42i32.render_value(), "42");
/// assert_eq!(Some("x".to_string()).render_value(), "x");
/// assert_eq!(None::<String>.render_value(), "null");
/// ```
pub trait FieldValue {
    /// Returns the display form of the value, or `None` when absent.
    fn render(&self) -> Option<String>;

    /// Returns the display form, using `"null"` for absent values.
    fn render_value(&self) -> String {
        self.render().unwrap_or_else(|| "null".to_string())
    }
}

macro_rules! display_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn render(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_field_value!(
    String, &'static str, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, f32, f64,
);

impl<V: FieldValue> FieldValue for Option<V> {
    fn render(&self) -> Option<String> {
        self.as_ref().and_then(FieldValue::render)
    }
}

impl<V: FieldValue> FieldValue for Vec<V> {
    fn render(&self) -> Option<String> {
        let items: Vec<String> = self.iter().map(FieldValue::render_value).collect();
        Some(format!("[{}]", items.join(", ")))
    }
}

/// Substitutes every `{value}` in `hint` with `rendered`.
pub(crate) fn render_hint(hint: &str, rendered: &str) -> String {
    hint.replace(VALUE_PLACEHOLDER, rendered)
}
