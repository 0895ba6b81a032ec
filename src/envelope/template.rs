//! Outbound envelope templates.

use crate::envelope::xml::escape_text;

/// Fault code used for every middleware-originated server fault.
pub const SERVER_FAULT_CODE: &str = "soap:Server";

/// Fault code used when the caller's request is rejected before delivery.
pub const CLIENT_FAULT_CODE: &str = "soap:Client";

/// Detail text attached to transport faults.
pub const TRANSPORT_FAULT_DETAIL: &str = "Middleware connection error";

/// Wrap a plain result string inside a SOAP response envelope.
pub fn response_envelope(result: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Body>
    <ExecuteResponse xmlns="http://tempuri.org/">
      <ExecuteResult>{}</ExecuteResult>
    </ExecuteResponse>
  </soap:Body>
</soap:Envelope>"#,
        escape_text(result)
    )
}

/// Build a SOAP fault envelope. Fault string and detail are escaped.
pub fn fault_envelope(code: &str, message: &str, detail: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>{}</faultcode>
      <faultstring>{}</faultstring>
      <detail>{}</detail>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#,
        code,
        escape_text(message),
        escape_text(detail)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_envelope_escapes_result() {
        let body = response_envelope(r#"<r a="1">x & 'y'</r>"#);
        assert!(body.contains(
            "<ExecuteResult>&lt;r a=&quot;1&quot;&gt;x &amp; &apos;y&apos;&lt;/r&gt;</ExecuteResult>"
        ));
        assert!(body.starts_with("<?xml"));
    }

    #[test]
    fn test_fault_envelope_fields() {
        let body = fault_envelope(SERVER_FAULT_CODE, "connection refused <127.0.0.1>", TRANSPORT_FAULT_DETAIL);
        assert!(body.contains("<faultcode>soap:Server</faultcode>"));
        assert!(body.contains("<faultstring>connection refused &lt;127.0.0.1&gt;</faultstring>"));
        assert!(body.contains("<detail>Middleware connection error</detail>"));
    }
}
