// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for committing a language change.
//!
//! Measures the performance of:
//! - Parsing identifiers into locales
//! - `set_locale` with a growing number of subscribers

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use locale_switch::config::Config;
use locale_switch::domain::Locale;
use locale_switch::infrastructure::{MemoryPreferenceStore, NoopPlatform};
use locale_switch::manager::LocaleManager;
use std::hint::black_box;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("locale_parse");

    for tag in ["en", "pt-BR", "zh-Hant-TW"] {
        group.bench_with_input(BenchmarkId::from_parameter(tag), tag, |b, tag| {
            b.iter(|| black_box(Locale::parse(black_box(tag))));
        });
    }

    group.finish();
}

/// Subscribers are drained every iteration so their queues stay small.
fn bench_set_locale(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_locale");

    for subscribers in [0usize, 1, 16, 128] {
        let manager =
            LocaleManager::new(MemoryPreferenceStore::new(), NoopPlatform, Config::default())
                .expect("default config is valid");
        let mut subs: Vec<_> = (0..subscribers)
            .map(|_| manager.observe_identifier())
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                let mut toggle = false;
                b.iter(|| {
                    toggle = !toggle;
                    let tag = if toggle { "fr" } else { "de" };
                    manager.set_locale(black_box(tag)).expect("set_locale failed");
                    for sub in &mut subs {
                        black_box(sub.drain());
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_set_locale);
criterion_main!(benches);
