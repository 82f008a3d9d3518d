use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gradebook::config::AppConfig;
use gradebook::service::auth::{issue_token, verify_token};
use gradebook::types::RegisterRequest;
use gradebook::validation::{is_valid_email, validate_registration};

fn benchmark_registration(c: &mut Criterion) {
    let req = RegisterRequest {
        name: Some("Ada Lovelace".to_string()),
        email: Some("ada.lovelace+notes@mail.example.com".to_string()),
        username: Some("ada1815".to_string()),
        password: Some("analytical-engine".to_string()),
        ..Default::default()
    };

    c.bench_function("validate_registration", |b| {
        b.iter(|| black_box(validate_registration(black_box(&req)).is_ok()))
    });
}

fn benchmark_email(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_valid_email");
    let inputs = [
        ("short", "a@b.de".to_string()),
        ("typical", "first.last@university.example.net".to_string()),
        ("long_local", format!("{}@example.com", "x".repeat(64))),
        ("rejected_tld", "someone@example.org".to_string()),
    ];
    for (label, email) in inputs.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(label), email, |b, email| {
            b.iter(|| black_box(is_valid_email(black_box(email))))
        });
    }
    group.finish();
}

fn benchmark_tokens(c: &mut Criterion) {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "bench-secret".to_string();
    let token = issue_token(&config.auth, "bench-user").unwrap();

    c.bench_function("issue_token", |b| {
        b.iter(|| black_box(issue_token(&config.auth, black_box("bench-user")).unwrap()))
    });
    c.bench_function("verify_token", |b| {
        b.iter(|| black_box(verify_token(&config.auth, black_box(&token)).unwrap()))
    });
}

criterion_group!(benches, benchmark_registration, benchmark_email, benchmark_tokens);
criterion_main!(benches);
