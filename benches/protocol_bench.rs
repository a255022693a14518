//! Benchmarks for ambimon reply handling

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ambimon::protocol::{handle_error, parse_reply, tokenize, Command};
use ambimon::transport::MockTransport;
use ambimon::{AmbientClient, Config};
use std::time::Duration;

fn protocol_benchmarks(c: &mut Criterion) {
    c.bench_function("parse_scalar_reply", |b| {
        b.iter(|| parse_reply(Command::GetTemperature, black_box(":REP:TEMPERATURE:23.5:!")))
    });

    c.bench_function("parse_pair_reply", |b| {
        b.iter(|| {
            parse_reply(
                Command::GetHumidityExtremes,
                black_box(":REP:HUMIDITY_EXTREMES:10:80:!"),
            )
        })
    });

    c.bench_function("handle_error", |b| {
        let tokens = tokenize(":ERROR:SENSOR_FAIL:ERROR:TIMEOUT:!");
        b.iter(|| handle_error(black_box(&tokens)))
    });

    c.bench_function("client_get_temperature", |b| {
        let transport = MockTransport::new();
        let handle = transport.handle();
        let config = Config::builder()
            .poll_interval(Duration::from_micros(10))
            .build();
        let mut client = AmbientClient::with_config(transport, &config).unwrap();

        b.iter(|| {
            handle.push_reply(":REP:TEMPERATURE:23.5:!");
            client.get_temperature().unwrap()
        })
    });
}

criterion_group!(benches, protocol_benchmarks);
criterion_main!(benches);
