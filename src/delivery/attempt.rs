//! Delivery strategies and the attempts they produce.

use std::collections::BTreeMap;

/// Content type of raw XML attempts and of every response the proxy writes.
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Content type of form-encoded attempts.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form field carrying the payload in form-encoded attempts.
pub const FORM_FIELD: &str = "Request";

/// Header carrying the action value on every attempt.
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Wire encoding of an attempt body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    RawXml,
    FormEncoded,
}

/// Which body an attempt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    /// Inner content pulled out by the extractor.
    Extracted,
    /// The inbound body exactly as received.
    Original,
}

/// One entry of the delivery ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    /// Label used in logs and metrics.
    pub name: &'static str,
    pub encoding: Encoding,
    pub source: PayloadSource,
}

/// Ordered fallback ladder. Most likely format first.
pub const STRATEGY_LADDER: [Strategy; 3] = [
    Strategy {
        name: "raw_xml",
        encoding: Encoding::RawXml,
        source: PayloadSource::Extracted,
    },
    Strategy {
        name: "form_encoded",
        encoding: Encoding::FormEncoded,
        source: PayloadSource::Extracted,
    },
    Strategy {
        name: "original_raw_xml",
        encoding: Encoding::RawXml,
        source: PayloadSource::Original,
    },
];

impl Strategy {
    /// Build the concrete attempt for this strategy.
    pub fn build(&self, extracted: &str, original: &str, soap_action: &str) -> DeliveryAttempt {
        let payload = match self.source {
            PayloadSource::Extracted => extracted,
            PayloadSource::Original => original,
        };

        let (body, content_type) = match self.encoding {
            Encoding::RawXml => (payload.to_string(), XML_CONTENT_TYPE),
            Encoding::FormEncoded => (
                url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(FORM_FIELD, payload)
                    .finish(),
                FORM_CONTENT_TYPE,
            ),
        };

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        headers.insert(SOAP_ACTION_HEADER.to_string(), soap_action.to_string());

        DeliveryAttempt {
            strategy: self.name,
            encoding: self.encoding,
            body,
            headers,
        }
    }
}

/// A fully prepared upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub strategy: &'static str,
    pub encoding: Encoding,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl DeliveryAttempt {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").map(String::as_str)
    }

    pub fn soap_action(&self) -> Option<&str> {
        self.headers.get(SOAP_ACTION_HEADER).map(String::as_str)
    }
}
