//! Tests for sharing validators across threads.

use fieldwise::{rules, FieldIdentity, Mode, Validator, ValidatorSet};
use std::any::Any;
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
struct User {
    name: String,
    age: i64,
}

#[derive(Debug)]
struct Email {
    address: String,
}

fn user_validator() -> Validator<User> {
    Validator::builder("User")
        .rule(&FieldIdentity::new("name", |u: &User| &u.name), rules::not_blank())
        .rule(&FieldIdentity::new("age", |u: &User| &u.age), rules::positive())
        .build()
}

fn email_validator() -> Validator<Email> {
    Validator::builder("Email")
        .rule(
            &FieldIdentity::new("address", |e: &Email| &e.address),
            rules::email(),
        )
        .build()
}

#[test]
fn test_concurrent_validation() {
    let validator = Arc::new(user_validator());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let user = User {
                    name: format!("User{}", i),
                    age: 20 + i,
                };
                assert!(validator.validate(&user).is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_results_are_independent() {
    let validator = user_validator();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = validator.clone();
            thread::spawn(move || {
                let user = User {
                    name: if i % 2 == 0 { String::new() } else { "Bob".into() },
                    age: -i,
                };
                let result = validator.validate(&user);
                // age is never positive here
                let expected = if i % 2 == 0 { 2 } else { 1 };
                assert_eq!(result.error_count(), expected, "thread {}", i);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_dispatch() {
    let validators = ValidatorSet::new();
    validators.register(user_validator()).unwrap();
    validators.register(email_validator()).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validators = validators.clone();
            thread::spawn(move || {
                let value: Box<dyn Any> = if i % 2 == 0 {
                    Box::new(Email {
                        address: "user@example.com".into(),
                    })
                } else {
                    Box::new(User {
                        name: "Carol".into(),
                        age: 40,
                    })
                };
                let result = validators
                    .validate_dyn(value.as_ref(), Mode::FailFast)
                    .unwrap();
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_registration() {
    let validators = ValidatorSet::new();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let validators = validators.clone();
            thread::spawn(move || validators.register(email_validator()).is_ok())
        })
        .collect();

    let registered = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(registered, 1);
    assert_eq!(validators.len(), 1);
    assert!(validators.contains::<Email>());
}

#[test]
fn test_registration_while_validating() {
    let validators = ValidatorSet::new();
    validators.register(user_validator()).unwrap();

    let reader = {
        let validators = validators.clone();
        thread::spawn(move || {
            for i in 0..100 {
                let user = User {
                    name: "Dave".into(),
                    age: i + 1,
                };
                assert!(validators.validate(&user).unwrap().is_success());
            }
        })
    };
    let writer = {
        let validators = validators.clone();
        thread::spawn(move || validators.register(email_validator()))
    };

    reader.join().unwrap();
    writer.join().unwrap().unwrap();
    assert_eq!(validators.len(), 2);
}
