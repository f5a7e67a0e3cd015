//! End-to-end walker tests over a mock ContentDirectory HTTP endpoint.

use browse_client::BrowseClient;
use media_walker::{walk_images, ContentDirectory, WalkEvent, ROOT_OBJECT_ID};
use mockito::{Matcher, Server};

fn escape(didl: &str) -> String {
    didl.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn soap_response(didl: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <u:BrowseResponse xmlns:u="urn:schemas-upnp-org:service:ContentDirectory:1">
      <Result>{}</Result>
      <NumberReturned>1</NumberReturned>
      <TotalMatches>1</TotalMatches>
      <UpdateID>1</UpdateID>
    </u:BrowseResponse>
  </s:Body>
</s:Envelope>"#,
        escape(didl)
    )
}

fn object_mock(server: &mut Server, object_id: &str, didl: &str) -> mockito::Mock {
    server
        .mock("POST", "/ctl/ContentDir")
        .match_body(Matcher::Regex(format!(
            "<ObjectID>{}</ObjectID>",
            object_id
        )))
        .with_status(200)
        .with_body(soap_response(didl))
        .create()
}

#[test]
fn walks_root_container_and_reports_image() {
    let mut server = Server::new();

    let root_mock = object_mock(
        &mut server,
        "0",
        r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/">
<container id="64" parentID="0" childCount="2"><dc:title>Photos</dc:title><upnp:class>object.container.storageFolder</upnp:class></container>
<item id="0.1" parentID="0"><dc:title>DSC00001.JPG</dc:title><upnp:class>object.item.imageItem.photo</upnp:class><res protocolInfo="http-get:*:image/jpeg:*" size="204800" resolution="1920x1080">http://10.0.0.1/image/1</res></item>
</DIDL-Lite>"#,
    );
    let child_mock = object_mock(
        &mut server,
        "64",
        r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/"></DIDL-Lite>"#,
    );

    let directory = ContentDirectory::new(BrowseClient::new(), server.url(), "/ctl/ContentDir");
    let events = walk_images(directory, ROOT_OBJECT_ID).unwrap();

    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        WalkEvent::ContainerEntered { id, child_count: 2, .. } if id == "64"
    ));
    match &events[1] {
        WalkEvent::ImageFound { resources, .. } => {
            assert_eq!(resources[0].resolution, "1920x1080");
            assert_eq!(resources[0].size, "204800");
        }
        other => panic!("expected ImageFound, got {:?}", other),
    }

    root_mock.assert();
    child_mock.assert();
}

#[test]
fn leaf_container_triggers_exactly_one_browse() {
    let mut server = Server::new();

    // only the root listing is served; a recursive Browse would 501
    let root_mock = server
        .mock("POST", "/ctl/ContentDir")
        .match_body(Matcher::Regex("<ObjectID>0</ObjectID>".to_string()))
        .with_status(200)
        .with_body(soap_response(
            r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/"><container id="65" parentID="0" childCount="0"><dc:title>Empty</dc:title></container></DIDL-Lite>"#,
        ))
        .expect(1)
        .create();

    let directory = ContentDirectory::new(BrowseClient::new(), server.url(), "/ctl/ContentDir");
    let events = walk_images(directory, ROOT_OBJECT_ID).unwrap();

    assert_eq!(events.len(), 1);
    root_mock.assert();
}
