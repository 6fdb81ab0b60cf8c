//! The NameSilo provider: list/append/set/delete record operations over
//! the vendor's HTTP/XML API.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, PartialError};
use crate::record::{self, Record};
use crate::wire::{self, AddReply, ApiReply, ListReply, RetrievedRecord, SUCCESS_CODE};

/// Production API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.namesilo.com/api/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider configuration. The default points at the production endpoint
/// with a 30-second per-request timeout and an empty token.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// NameSilo DNS record client.
///
/// Holds only the credential, the endpoint, and one shared HTTP client;
/// no state is carried between calls, so a single instance is safe to
/// share across tasks. Within one call, per-record requests are issued
/// strictly one at a time.
pub struct Provider {
    api_token: String,
    endpoint: String,
    client: Client,
}

impl Provider {
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            api_token: config.api_token,
            endpoint: config.endpoint,
            client,
        })
    }

    /// Provider against the production endpoint.
    pub fn with_token(api_token: impl Into<String>) -> Result<Self, Error> {
        Self::new(Config {
            api_token: api_token.into(),
            ..Config::default()
        })
    }

    /// Lists all records in the zone, in vendor-returned order.
    pub async fn list_records(&self, zone: &str) -> Result<Vec<Record>, Error> {
        self.require_token()?;
        let records = self.fetch_records(zone).await?;
        debug!(zone, count = records.len(), "listed records");
        Ok(records.into_iter().map(|r| r.record).collect())
    }

    /// Adds the given records to the zone, one API call per record, and
    /// returns echoes of the inputs that were added.
    ///
    /// Not transactional: the first failure aborts the loop and the
    /// resulting [`PartialError`] carries the records already added.
    pub async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, PartialError> {
        self.require_token()?;

        let mut appended = Vec::new();
        for record in records {
            if let Err(error) = self.add_record(zone, record).await {
                return Err(PartialError::new(appended, error));
            }
            appended.push(record.clone());
        }

        Ok(appended)
    }

    /// Replaces records keyed by (name, type): when a record with the same
    /// name and type already exists it is deleted first, then the new
    /// record is added. Delete-then-add, not an atomic replace.
    ///
    /// The key deliberately ignores record content, so zones holding
    /// several records under one (name, type) — e.g. multiple TXT records
    /// on a name — are not supported: only the first match gets replaced
    /// and siblings may be left behind or duplicated.
    pub async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, PartialError> {
        self.require_token()?;

        let existing: HashSet<(String, String)> = self
            .fetch_records(zone)
            .await?
            .iter()
            .map(|r| (r.record.name().to_string(), r.record.rtype().to_string()))
            .collect();

        let mut results = Vec::new();
        for record in records {
            let key = (record.name().to_string(), record.rtype().to_string());
            if existing.contains(&key) {
                if let Err(error) = self
                    .delete_by_name_type(zone, record.name(), record.rtype())
                    .await
                {
                    return Err(PartialError::new(results, error));
                }
            }
            if let Err(error) = self.add_record(zone, record).await {
                return Err(PartialError::new(results, error));
            }
            results.push(record.clone());
        }

        Ok(results)
    }

    /// Deletes the given records and returns echoes of the inputs that
    /// were removed. A record with no exact (name, type, data) match in
    /// the zone is skipped silently; deleting something already absent is
    /// a no-op.
    pub async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, PartialError> {
        self.require_token()?;

        let existing = self.fetch_records(zone).await?;

        let mut deleted = Vec::new();
        for record in records {
            let id = existing
                .iter()
                .find(|r| {
                    r.record.name() == record.name()
                        && r.record.rtype() == record.rtype()
                        && r.record.data() == record.data()
                })
                .map(|r| r.id.as_str());
            let Some(id) = id else { continue };

            if let Err(error) = self.delete_by_id(zone, id).await {
                return Err(PartialError::new(deleted, error));
            }
            deleted.push(record.clone());
        }

        Ok(deleted)
    }

    fn require_token(&self) -> Result<(), Error> {
        if self.api_token.is_empty() {
            Err(Error::MissingToken)
        } else {
            Ok(())
        }
    }

    /// Builds a fully-encoded request URL. Empty parameter values are
    /// omitted rather than sent empty.
    fn build_url(&self, operation: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}{}", self.endpoint, operation))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("version", "1");
            query.append_pair("type", "xml");
            query.append_pair("key", &self.api_token);
            for (name, value) in params {
                if !value.is_empty() {
                    query.append_pair(name, value);
                }
            }
        }
        Ok(url)
    }

    async fn call<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(Error::Status { status, body });
        }

        quick_xml::de::from_str(&body).map_err(|source| Error::Xml { source, body })
    }

    async fn fetch_records(&self, zone: &str) -> Result<Vec<RetrievedRecord>, Error> {
        let domain = zone.trim_end_matches('.');
        let url = self.build_url("dnsListRecords", &[("domain", domain)])?;

        let reply: ListReply = self.call(url).await?;
        if reply.code != SUCCESS_CODE {
            return Err(Error::Api {
                zone: zone.to_string(),
                code: reply.code,
                detail: reply.detail,
            });
        }

        Ok(reply.records.into_iter().map(wire::into_record).collect())
    }

    async fn add_record(&self, zone: &str, record: &Record) -> Result<(), Error> {
        let domain = zone.trim_end_matches('.');
        let host = record::normalize_record_name(record.name(), zone);
        let ttl = record::validate_ttl(record.ttl()).to_string();
        let (value, distance) = wire::outbound_fields(record);
        // Distance 0 means "omit"; build_url drops the empty value.
        let distance = if distance > 0 {
            distance.to_string()
        } else {
            String::new()
        };

        let url = self.build_url(
            "dnsAddRecord",
            &[
                ("domain", domain),
                ("rrtype", record.rtype()),
                ("rrhost", &host),
                ("rrvalue", &value),
                ("rrttl", &ttl),
                ("rrdistance", &distance),
            ],
        )?;

        let reply: AddReply = self.call(url).await?;
        if reply.code != SUCCESS_CODE {
            return Err(Error::Api {
                zone: zone.to_string(),
                code: reply.code,
                detail: reply.detail,
            });
        }

        debug!(zone, id = %reply.record_id, rtype = record.rtype(), "added record");
        Ok(())
    }

    // Resolves the vendor ID from a fresh list; the first (name, type)
    // match wins, record content is not consulted.
    async fn delete_by_name_type(&self, zone: &str, name: &str, rtype: &str) -> Result<(), Error> {
        let existing = self.fetch_records(zone).await?;
        let id = existing
            .iter()
            .find(|r| r.record.name() == name && r.record.rtype() == rtype)
            .map(|r| r.id.clone())
            .ok_or_else(|| Error::RecordNotFound {
                name: name.to_string(),
                rtype: rtype.to_string(),
            })?;

        self.delete_by_id(zone, &id).await
    }

    async fn delete_by_id(&self, zone: &str, record_id: &str) -> Result<(), Error> {
        let domain = zone.trim_end_matches('.');
        let url = self.build_url("dnsDeleteRecord", &[("domain", domain), ("rrid", record_id)])?;

        let reply: ApiReply = self.call(url).await?;
        if reply.code != SUCCESS_CODE {
            return Err(Error::Api {
                zone: zone.to_string(),
                code: reply.code,
                detail: reply.detail,
            });
        }

        debug!(zone, id = record_id, "deleted record");
        Ok(())
    }
}
