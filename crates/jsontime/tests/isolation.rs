use chrono::{DateTime, TimeZone, Utc};
use jsontime::{Codec, TimeConfig, Zone, time_fields};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Barrier};
use std::thread;

#[time_fields]
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Stamp {
    at: DateTime<Utc>,
}

fn stamp() -> Stamp {
    Stamp { at: Utc.with_ymd_and_hms(2017, 12, 31, 16, 0, 0).unwrap() }
}

#[test]
fn concurrent_codecs_with_different_configs_stay_isolated() {
    let cases = [
        ("UTC", r#"{"at":"2017-12-31T16:00:00Z"}"#),
        ("Asia/Shanghai", r#"{"at":"2018-01-01T00:00:00+08:00"}"#),
        ("America/New_York", r#"{"at":"2017-12-31T11:00:00-05:00"}"#),
        ("+05:45", r#"{"at":"2017-12-31T21:45:00+05:45"}"#),
    ];
    let barrier = Arc::new(Barrier::new(cases.len()));

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(zone, expected)| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let zone: Zone = zone.parse().unwrap();
                let codec = Codec::new(TimeConfig::builder().default_zone(zone).build());
                barrier.wait();

                for _ in 0..200 {
                    let json = codec.to_string(&stamp()).unwrap();
                    assert_eq!(json, expected);
                    assert_eq!(codec.from_str::<Stamp>(&json).unwrap(), stamp());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn shared_config_registrations_race_with_encoding() {
    #[time_fields]
    #[derive(Debug, Serialize, Deserialize)]
    struct Aliased {
        #[time(zone = "home")]
        at: DateTime<Utc>,
    }

    let config = TimeConfig::new();
    config.register_zone("home", Zone::Utc);

    let writer = {
        let config = config.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let zone = if i % 2 == 0 { Zone::Utc } else { "Asia/Shanghai".parse().unwrap() };
                config.register_zone("home", zone);
            }
        })
    };

    let codec = config.codec();
    let value = Aliased { at: stamp().at };
    for _ in 0..200 {
        let json = codec.to_string(&value).unwrap();
        assert!(
            json == r#"{"at":"2017-12-31T16:00:00Z"}"#
                || json == r#"{"at":"2018-01-01T00:00:00+08:00"}"#,
            "{json}"
        );
    }

    writer.join().unwrap();
}

#[test]
fn nested_codec_calls_restore_the_outer_config() {
    let outer = Codec::new(TimeConfig::builder().default_zone("+01:00".parse().unwrap()).build());
    let inner = Codec::default();

    let json = outer
        .config()
        .scoped(|| {
            let nested = inner.to_string(&stamp())?;
            assert_eq!(nested, r#"{"at":"2017-12-31T16:00:00Z"}"#);
            Ok::<_, jsontime::TimeError>(serde_json::to_string(&stamp())?)
        })
        .unwrap();

    assert_eq!(json, r#"{"at":"2017-12-31T17:00:00+01:00"}"#);
}
