//! Generic DNS record model and the name/TTL normalization rules NameSilo
//! expects.

use std::time::Duration;

/// NameSilo rejects TTLs below this.
pub(crate) const MIN_TTL_SECS: u64 = 300;
/// Substituted wholesale when a TTL is below [`MIN_TTL_SECS`].
pub(crate) const DEFAULT_TTL_SECS: u64 = 3600;

/// A single DNS resource record.
///
/// The variant set is closed; record types the adapter has no structured
/// representation for are carried as [`Record::Other`] with the raw type
/// tag and value, which keeps them byte-identical through a list/delete
/// round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    A {
        name: String,
        ttl: Duration,
        address: String,
    },
    Aaaa {
        name: String,
        ttl: Duration,
        address: String,
    },
    Cname {
        name: String,
        ttl: Duration,
        target: String,
    },
    Mx {
        name: String,
        ttl: Duration,
        preference: u16,
        target: String,
    },
    Txt {
        name: String,
        ttl: Duration,
        text: String,
    },
    Ns {
        name: String,
        ttl: Duration,
        target: String,
    },
    Srv {
        name: String,
        ttl: Duration,
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    /// Fallback for record types without a structured variant.
    Other {
        name: String,
        ttl: Duration,
        rtype: String,
        data: String,
    },
}

impl Record {
    pub fn name(&self) -> &str {
        match self {
            Record::A { name, .. }
            | Record::Aaaa { name, .. }
            | Record::Cname { name, .. }
            | Record::Mx { name, .. }
            | Record::Txt { name, .. }
            | Record::Ns { name, .. }
            | Record::Srv { name, .. }
            | Record::Other { name, .. } => name,
        }
    }

    pub fn ttl(&self) -> Duration {
        match self {
            Record::A { ttl, .. }
            | Record::Aaaa { ttl, .. }
            | Record::Cname { ttl, .. }
            | Record::Mx { ttl, .. }
            | Record::Txt { ttl, .. }
            | Record::Ns { ttl, .. }
            | Record::Srv { ttl, .. }
            | Record::Other { ttl, .. } => *ttl,
        }
    }

    /// The record's type tag as sent on the wire.
    pub fn rtype(&self) -> &str {
        match self {
            Record::A { .. } => "A",
            Record::Aaaa { .. } => "AAAA",
            Record::Cname { .. } => "CNAME",
            Record::Mx { .. } => "MX",
            Record::Txt { .. } => "TXT",
            Record::Ns { .. } => "NS",
            Record::Srv { .. } => "SRV",
            Record::Other { rtype, .. } => rtype,
        }
    }

    /// Canonical RR data string. Together with [`Self::name`] and
    /// [`Self::rtype`] this forms the identity used when matching records
    /// for deletion; TTL is deliberately not part of it.
    pub fn data(&self) -> String {
        match self {
            Record::A { address, .. } | Record::Aaaa { address, .. } => address.clone(),
            Record::Cname { target, .. } | Record::Ns { target, .. } => target.clone(),
            Record::Mx {
                preference, target, ..
            } => format!("{preference} {target}"),
            Record::Txt { text, .. } => text.clone(),
            Record::Srv {
                priority,
                weight,
                port,
                target,
                ..
            } => format!("{priority} {weight} {port} {target}"),
            Record::Other { data, .. } => data.clone(),
        }
    }
}

/// Converts a record name to its zone-relative form.
///
/// The zone's trailing root dot is ignored. The root of the zone (`@`, the
/// empty string, or the bare zone itself) maps to `@`; a name fully
/// qualified under the zone has the zone suffix stripped; anything else is
/// assumed to already be relative and passes through untouched. No
/// character validation happens here, the API is the final arbiter.
pub fn normalize_record_name(name: &str, zone: &str) -> String {
    let zone = zone.trim_end_matches('.');

    if name == "@" || name.is_empty() || name == zone {
        return "@".to_string();
    }

    if let Some(relative) = name.strip_suffix(&format!(".{zone}")) {
        return relative.to_string();
    }

    name.to_string()
}

/// Converts a TTL to whole seconds acceptable to NameSilo.
///
/// TTLs below the vendor minimum of 300s are replaced by the 3600s default
/// outright rather than clamped to the minimum. Vendor policy, reproduced
/// as-is.
pub fn validate_ttl(ttl: Duration) -> u64 {
    let seconds = ttl.as_secs();
    if seconds < MIN_TTL_SECS {
        DEFAULT_TTL_SECS
    } else {
        seconds
    }
}
