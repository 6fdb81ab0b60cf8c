//! Wire types for the NameSilo XML API and the mapping between wire
//! records and [`Record`] values.

use std::time::Duration;

use serde::Deserialize;

use crate::record::Record;

/// Reply code NameSilo uses to signal success.
pub(crate) const SUCCESS_CODE: i32 = 300;

/// Common reply envelope: `<reply><code>…</code><detail>…</detail></reply>`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiReply {
    pub code: i32,
    #[serde(default)]
    pub detail: String,
}

/// Reply to `dnsListRecords`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListReply {
    pub code: i32,
    #[serde(default)]
    pub detail: String,
    #[serde(default, rename = "resource_record")]
    pub records: Vec<WireRecord>,
}

/// Reply to `dnsAddRecord`.
#[derive(Debug, Deserialize)]
pub(crate) struct AddReply {
    pub code: i32,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub record_id: String,
}

/// One `<resource_record>` element. `distance` is overloaded by the
/// vendor: MX preference for MX records, SRV priority for SRV records.
#[derive(Debug, Deserialize)]
pub(crate) struct WireRecord {
    #[serde(default)]
    pub record_id: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub host: String,
    pub value: String,
    #[serde(default)]
    pub ttl: u64,
    #[serde(default)]
    pub distance: u16,
}

/// A record as returned by the vendor, paired with its vendor-assigned ID.
///
/// IDs live only for the duration of a single operation; they are resolved
/// again from a fresh list whenever a deletion needs one and are never
/// exposed through [`Record`].
#[derive(Debug, Clone)]
pub(crate) struct RetrievedRecord {
    pub id: String,
    pub record: Record,
}

/// Maps a wire record to its generic form.
///
/// A/AAAA and unrecognized types are carried as [`Record::Other`] with the
/// raw type tag and value.
pub(crate) fn into_record(wire: WireRecord) -> RetrievedRecord {
    let ttl = Duration::from_secs(wire.ttl);
    let id = wire.record_id.clone();

    let record = match wire.rtype.to_uppercase().as_str() {
        "MX" => Record::Mx {
            name: wire.host,
            ttl,
            preference: wire.distance,
            target: wire.value,
        },
        "TXT" => Record::Txt {
            name: wire.host,
            ttl,
            text: wire.value,
        },
        "CNAME" => Record::Cname {
            name: wire.host,
            ttl,
            target: wire.value,
        },
        "NS" => Record::Ns {
            name: wire.host,
            ttl,
            target: wire.value,
        },
        "SRV" => parse_srv(wire, ttl),
        _ => Record::Other {
            name: wire.host,
            ttl,
            rtype: wire.rtype,
            data: wire.value,
        },
    };

    RetrievedRecord { id, record }
}

/// Splits an SRV value of the form `weight port target…` (target may
/// itself contain spaces).
///
/// Fewer than three tokens, or a port that does not parse, degrades the
/// whole record to [`Record::Other`] so a later delete still matches the
/// raw value. A weight that does not parse is coerced to 0 instead; the
/// asymmetry matches the vendor's informal format handling.
fn parse_srv(wire: WireRecord, ttl: Duration) -> Record {
    let tokens: Vec<&str> = wire.value.split_whitespace().collect();

    if tokens.len() >= 3 {
        let weight = tokens[0].parse::<u16>().unwrap_or(0);
        if let Ok(port) = tokens[1].parse::<u16>() {
            let target = tokens[2..].join(" ");
            return Record::Srv {
                name: wire.host,
                ttl,
                priority: wire.distance,
                weight,
                port,
                target,
            };
        }
    }

    Record::Other {
        name: wire.host,
        ttl,
        rtype: wire.rtype,
        data: wire.value,
    }
}

/// Extracts the wire value and distance for an outbound record.
///
/// A distance of 0 means "omit"; it is only sent for MX and SRV records,
/// which carry a real preference/priority.
pub(crate) fn outbound_fields(record: &Record) -> (String, u16) {
    match record {
        Record::Mx {
            preference, target, ..
        } => (target.clone(), *preference),
        Record::Srv {
            priority,
            weight,
            port,
            target,
            ..
        } => (format!("{weight} {port} {target}"), *priority),
        other => (other.data(), 0),
    }
}
