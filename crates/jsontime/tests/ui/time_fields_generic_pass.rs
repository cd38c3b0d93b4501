use chrono::{DateTime, Utc};
use jsontime::time_fields;
use serde::{Deserialize, Serialize};

#[time_fields]
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    payload: T,
    #[time(format = "rfc3339_nano")]
    sent_at: DateTime<Utc>,
}

fn main() {
    let envelope = Envelope { payload: 7_u8, sent_at: Utc::now() };
    let json = jsontime::Codec::default().to_string(&envelope).unwrap();
    let back: Envelope<u8> = jsontime::Codec::default().from_str(&json).unwrap();
    assert_eq!(back.sent_at, envelope.sent_at);
}
