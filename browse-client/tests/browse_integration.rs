//! Integration tests for the Browse client against a mock HTTP server.

use browse_client::{BrowseClient, BrowseError};
use mockito::{Matcher, Server};

const DIDL: &str = r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/"><container id="64" parentID="0" childCount="2"><dc:title>Photos</dc:title><upnp:class>object.container.storageFolder</upnp:class></container><item id="64.1" parentID="64"><dc:title>DSC00001.JPG</dc:title><upnp:class>object.item.imageItem.photo</upnp:class><res protocolInfo="http-get:*:image/jpeg:*" size="204800" resolution="1920x1080">http://10.0.0.1/image?id=1&amp;kind=full</res></item></DIDL-Lite>"#;

fn escape(didl: &str) -> String {
    didl.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn soap_response(result_payload: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <u:BrowseResponse xmlns:u="urn:schemas-upnp-org:service:ContentDirectory:1">
      <Result>{}</Result>
      <NumberReturned>2</NumberReturned>
      <TotalMatches>2</TotalMatches>
      <UpdateID>1</UpdateID>
    </u:BrowseResponse>
  </s:Body>
</s:Envelope>"#,
        result_payload
    )
}

#[test]
fn browse_parses_escaped_result_payload() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/ctl/ContentDir")
        .match_header("content-type", "text/xml; charset=utf-8")
        .match_header(
            "soapaction",
            "\"urn:schemas-upnp-org:service:ContentDirectory:1#Browse\"",
        )
        .match_body(Matcher::Regex("<ObjectID>0</ObjectID>".to_string()))
        .with_status(200)
        .with_body(soap_response(&escape(DIDL)))
        .create();

    let client = BrowseClient::new();
    let didl = client.browse(&server.url(), "/ctl/ContentDir", "0").unwrap();

    assert_eq!(didl.containers.len(), 1);
    assert_eq!(didl.containers[0].id, "64");
    assert_eq!(didl.containers[0].child_count, 2);
    assert_eq!(didl.items.len(), 1);
    assert_eq!(didl.items[0].resources[0].resolution, "1920x1080");
    assert_eq!(didl.items[0].resources[0].size, "204800");
    // the URL's own entity survives exactly one unescape level
    assert_eq!(
        didl.items[0].resources[0].url,
        "http://10.0.0.1/image?id=1&kind=full"
    );

    mock.assert();
}

#[test]
fn browse_sends_requested_object_id() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/ctl/ContentDir")
        .match_body(Matcher::Regex("<ObjectID>64</ObjectID>".to_string()))
        .with_status(200)
        .with_body(soap_response(&escape(
            r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"></DIDL-Lite>"#,
        )))
        .create();

    let client = BrowseClient::new();
    let didl = client
        .browse(&server.url(), "/ctl/ContentDir", "64")
        .unwrap();

    assert!(didl.is_empty());
    mock.assert();
}

#[test]
fn missing_result_marker_is_a_protocol_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/ctl/ContentDir")
        .with_status(200)
        .with_body("<s:Envelope><s:Body></s:Body></s:Envelope>")
        .create();

    let client = BrowseClient::new();
    let err = client
        .browse(&server.url(), "/ctl/ContentDir", "0")
        .unwrap_err();

    match err {
        BrowseError::Protocol(msg) => assert!(msg.contains("Result not found")),
        other => panic!("expected Protocol error, got {:?}", other),
    }
}

#[test]
fn upnp_fault_surfaces_its_error_code() {
    let fault = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>701</errorCode>
          <errorDescription>No such object</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/ctl/ContentDir")
        .with_status(500)
        .with_body(fault)
        .create();

    let client = BrowseClient::new();
    let err = client
        .browse(&server.url(), "/ctl/ContentDir", "no-such-id")
        .unwrap_err();

    match err {
        BrowseError::Fault(code) => assert_eq!(code, 701),
        other => panic!("expected Fault, got {:?}", other),
    }
}

#[test]
fn plain_http_error_is_a_network_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/ctl/ContentDir")
        .with_status(500)
        .with_body("internal server error")
        .create();

    let client = BrowseClient::new();
    let err = client
        .browse(&server.url(), "/ctl/ContentDir", "0")
        .unwrap_err();

    match err {
        BrowseError::Network(msg) => assert!(msg.contains("500")),
        other => panic!("expected Network error, got {:?}", other),
    }
}

#[test]
fn malformed_payload_is_a_parse_error_carrying_the_text() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/ctl/ContentDir")
        .with_status(200)
        .with_body(soap_response("&lt;DIDL-Lite&gt;&lt;container id="))
        .create();

    let client = BrowseClient::new();
    let err = client
        .browse(&server.url(), "/ctl/ContentDir", "0")
        .unwrap_err();

    match err {
        BrowseError::Parse(parse) => {
            assert!(parse.to_string().contains("<DIDL-Lite><container id="))
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn absolute_control_url_ignores_base() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/ctl/ContentDir")
        .with_status(200)
        .with_body(soap_response(&escape(
            r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"></DIDL-Lite>"#,
        )))
        .create();

    let control = format!("{}/ctl/ContentDir", server.url());
    let client = BrowseClient::new();
    client
        .browse("http://unreachable.invalid", &control, "0")
        .unwrap();

    mock.assert();
}
