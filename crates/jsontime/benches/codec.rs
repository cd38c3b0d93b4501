use chrono::{DateTime, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use jsontime::{TimeConfig, Tz, time_fields};
use serde::{Deserialize, Serialize};
use std::hint::black_box;

#[time_fields]
#[derive(Serialize, Deserialize)]
struct BenchRow {
    id: u64,
    created_at: DateTime<Utc>,
    #[time(format = "sql_datetime", zone = "shanghai")]
    updated_at: Option<DateTime<Tz>>,
    #[time(format = "%d/%m/%Y %H:%M:%S")]
    seen_at: DateTime<Utc>,
}

fn rows(count: usize) -> Vec<BenchRow> {
    let base = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let at = base + chrono::Duration::seconds(i as i64 * 37);
            BenchRow {
                id: i as u64,
                created_at: at,
                updated_at: Some(at.with_timezone(&Tz::Asia__Shanghai)),
                seen_at: at,
            }
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let config = TimeConfig::builder().default_zone("Europe/Kyiv".parse().unwrap()).build();
    config.register_format("sql_datetime", "2006-01-02 15:04:05").unwrap();
    config.register_zone("shanghai", "Asia/Shanghai".parse().unwrap());
    let codec = config.codec();

    for count in [1usize, 100, 1000] {
        let data = rows(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("encode", count), &data, |b, d| {
            b.iter(|| codec.to_vec(black_box(d)).unwrap());
        });

        let encoded = codec.to_vec(&data).expect("encode failed");
        group.bench_with_input(BenchmarkId::new("decode", count), &encoded, |b, e| {
            b.iter(|| {
                let _: Vec<BenchRow> = codec.from_slice(black_box(e)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
