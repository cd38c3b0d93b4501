use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use jsontime::{Codec, Layout, TimeConfig, Tz, Zone, time_fields};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

const ZONES: &[&str] = &["UTC", "Local", "Asia/Shanghai", "Europe/Kyiv", "-03:30", "+12:45"];

#[time_fields]
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u64,
    label: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<FixedOffset>>,
    #[time(format = "rfc3339_nano", zone = "UTC")]
    precise_at: DateTime<Tz>,
    #[time(format = "%s")]
    epoch_at: Option<DateTime<Utc>>,
}

fn seconds() -> impl Strategy<Value = i64> {
    0_i64..4_102_444_800
}

fn instant(seconds: i64, nanos: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, nanos).single().expect("in range")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn records_roundtrip_under_any_default_zone(
        id in any::<u64>(),
        label in "[a-zA-Z0-9 ]{0,24}",
        created in seconds(),
        updated in proptest::option::of(seconds()),
        precise in seconds(),
        nanos in 0_u32..1_000_000_000,
        epoch in proptest::option::of(seconds()),
        zone in proptest::sample::select(ZONES),
    ) {
        let zone: Zone = zone.parse().unwrap();
        let codec = Codec::new(TimeConfig::builder().default_zone(zone).build());

        let record = Record {
            id,
            label,
            created_at: instant(created, 0),
            updated_at: updated.map(|s| instant(s, 0).fixed_offset()),
            precise_at: instant(precise, nanos).with_timezone(&Tz::UTC),
            epoch_at: epoch.map(|s| instant(s, 0)),
        };

        let json = codec.to_string(&record).unwrap();
        let decoded: Record = codec.from_str(&json).unwrap();
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn date_only_default_roundtrips_midnights(
        days in 8_036_i64..40_000,
        zone in proptest::sample::select(&ZONES[2..]),
    ) {
        #[time_fields]
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Day {
            on: DateTime<Tz>,
        }

        let zone: Zone = zone.parse().unwrap();
        let config = TimeConfig::builder()
            .default_layout(Layout::well_known("date_only").unwrap())
            .default_zone(zone)
            .build();

        let date = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Days::new(days.unsigned_abs());
        let on = zone.localize(date.and_time(chrono::NaiveTime::MIN)).unwrap();
        let day = Day { on: on.with_timezone(&zone.tz().unwrap_or(Tz::UTC)) };

        let codec = config.codec();
        let json = codec.to_string(&day).unwrap();
        prop_assert_eq!(&json, &format!(r#"{{"on":"{}"}}"#, date.format("%Y-%m-%d")));
        prop_assert_eq!(codec.from_str::<Day>(&json).unwrap(), day);
    }
}
