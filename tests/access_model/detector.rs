//! Access-control detection against a scripted server.

use hyper::StatusCode;
use hyper::http::HeaderMap;
use podbrowser::fetch::{self, ACCEPT_NTRIPLES};
use podbrowser::{
    AccessControlType, AccessMode, Detector, ProbeStatus, ResourceInfo, ResourceKind,
    detect_access_control_type,
};

use super::harness::{ACL_LINK, ACP_TYPE_LINK, DOC, DOC_ACL, ScriptedProbe};

fn doc_info(link: &str) -> ResourceInfo {
    let mut headers = HeaderMap::new();
    headers.insert("link", link.parse().unwrap());
    ResourceInfo::from_headers(DOC, &headers).unwrap()
}

// ---------------------------------------------------------------------------
// detect_access_control_type
// ---------------------------------------------------------------------------

/// Nothing fetched yet: no answer and no network traffic.
#[tokio::test]
async fn absent_resource_info_skips_probe() {
    let probe = ScriptedProbe::new();
    assert_eq!(detect_access_control_type(None, &probe).await, None);
    assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn acp_resource() {
    let probe = ScriptedProbe::new().reply(DOC_ACL, StatusCode::OK, &[("link", ACP_TYPE_LINK)], "");
    let result = detect_access_control_type(Some(&doc_info(ACL_LINK)), &probe).await;
    assert_eq!(result, Some(AccessControlType::Acp));
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn wac_resource() {
    let probe = ScriptedProbe::new().reply(DOC_ACL, StatusCode::OK, &[], "");
    let result = detect_access_control_type(Some(&doc_info(ACL_LINK)), &probe).await;
    assert_eq!(result, Some(AccessControlType::Wac));
}

/// An access-control document the user may not read means no model can be
/// shown, which is not a failure.
#[tokio::test]
async fn forbidden_acl_is_unsupported() {
    let probe = ScriptedProbe::new().reply(DOC_ACL, StatusCode::FORBIDDEN, &[], "");
    let result = detect_access_control_type(Some(&doc_info(ACL_LINK)), &probe).await;
    assert_eq!(result, None);
}

/// A transport failure is swallowed and reported as `None`.
#[tokio::test]
async fn probe_failure_yields_none() {
    let probe = ScriptedProbe::new();
    let result = detect_access_control_type(Some(&doc_info(ACL_LINK)), &probe).await;
    assert_eq!(result, None);
    assert_eq!(probe.calls(), 1);
}

// ---------------------------------------------------------------------------
// Detector memoization
// ---------------------------------------------------------------------------

/// A second detection for the same IRI is answered from the memo.
#[tokio::test]
async fn detector_probes_once_per_resource() {
    let probe = ScriptedProbe::new().reply(DOC_ACL, StatusCode::OK, &[("link", ACP_TYPE_LINK)], "");
    let detector = Detector::new(probe);
    let info = doc_info(ACL_LINK);

    assert_eq!(detector.status(DOC), ProbeStatus::Unknown);
    assert_eq!(detector.detect(Some(&info)).await, Some(AccessControlType::Acp));
    assert_eq!(detector.detect(Some(&info)).await, Some(AccessControlType::Acp));
    assert_eq!(detector.probe().calls(), 1);
    assert_eq!(detector.status(DOC), ProbeStatus::Acp);

    detector.invalidate(DOC);
    assert_eq!(detector.status(DOC), ProbeStatus::Unknown);
    assert_eq!(detector.detect(Some(&info)).await, Some(AccessControlType::Acp));
    assert_eq!(detector.probe().calls(), 2);
}

/// Failures go back to `Unknown` so the user can retry.
#[tokio::test]
async fn detector_does_not_cache_failures() {
    let detector = Detector::new(ScriptedProbe::new());
    let info = doc_info(ACL_LINK);

    assert_eq!(detector.detect(Some(&info)).await, None);
    assert_eq!(detector.status(DOC), ProbeStatus::Unknown);
    assert_eq!(detector.detect(Some(&info)).await, None);
    assert_eq!(detector.probe().calls(), 2);
}

/// Unsupported is terminal and cached like a detected model.
#[tokio::test]
async fn detector_caches_unsupported() {
    let detector = Detector::new(ScriptedProbe::new());
    let info = ResourceInfo::from_headers(DOC, &HeaderMap::new()).unwrap();

    assert_eq!(detector.detect(Some(&info)).await, None);
    assert_eq!(detector.status(DOC), ProbeStatus::Unsupported);
    assert_eq!(detector.probe().calls(), 0);
}

/// A second detection while the first is in flight gets `None` and does
/// not send its own request.
#[tokio::test]
async fn concurrent_detections_share_one_request() {
    let probe = ScriptedProbe::new()
        .reply(DOC_ACL, StatusCode::OK, &[], "")
        .yielding();
    let detector = Detector::new(probe);
    let info = doc_info(ACL_LINK);

    let (first, second) = tokio::join!(detector.detect(Some(&info)), detector.detect(Some(&info)));
    let wac = Some(AccessControlType::Wac);
    assert!(
        (first, second) == (wac, None) || (first, second) == (None, wac),
        "exactly one caller should see the result: {first:?}, {second:?}"
    );
    assert_eq!(detector.probe().calls(), 1);
    assert_eq!(detector.status(DOC), ProbeStatus::Wac);
}

/// Dropping a detection mid-request puts the resource back to `Unknown`,
/// so the next detection asks again.
#[test]
fn abandoned_detection_can_be_retried() {
    let probe = ScriptedProbe::new()
        .reply(DOC_ACL, StatusCode::OK, &[], "")
        .stall_next(1);
    let detector = Detector::new(probe);
    let info = doc_info(ACL_LINK);

    {
        let mut pending = tokio_test::task::spawn(detector.detect(Some(&info)));
        tokio_test::assert_pending!(pending.poll());
        assert_eq!(detector.status(DOC), ProbeStatus::Probing);
    }
    assert_eq!(detector.status(DOC), ProbeStatus::Unknown);

    let result = tokio_test::block_on(detector.detect(Some(&info)));
    assert_eq!(result, Some(AccessControlType::Wac));
    assert_eq!(detector.status(DOC), ProbeStatus::Wac);
    assert_eq!(detector.probe().calls(), 2);
}

#[test]
fn detector_without_info_is_inert() {
    let detector = Detector::new(ScriptedProbe::new());
    let result = tokio_test::block_on(detector.detect(None));
    assert_eq!(result, None);
    assert_eq!(detector.probe().calls(), 0);
}

// ---------------------------------------------------------------------------
// fetch_resource
// ---------------------------------------------------------------------------

const CONTAINER: &str = "https://pod.example/docs/";

#[tokio::test]
async fn fetch_container_then_detect() {
    let body = "<https://pod.example/docs/> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/ns/ldp#BasicContainer> .\n\
                <https://pod.example/docs/> <http://www.w3.org/ns/ldp#contains> <https://pod.example/docs/notes.ttl> .\n";
    let probe = ScriptedProbe::new()
        .reply(
            CONTAINER,
            StatusCode::OK,
            &[
                ("content-type", ACCEPT_NTRIPLES),
                ("link", r#"<.acl>; rel="acl""#),
                ("wac-allow", r#"user="read write",public="read""#),
            ],
            body,
        )
        .reply("https://pod.example/docs/.acl", StatusCode::OK, &[], "");

    let (info, resource) = fetch::fetch_resource(&probe, CONTAINER).await.unwrap();
    assert_eq!(resource.kind(), ResourceKind::Container);
    assert_eq!(resource.contains, ["https://pod.example/docs/notes.ttl"]);

    let permissions = info.permissions.unwrap();
    assert_eq!(permissions.user, AccessMode::new(true, true, false, false));
    assert_eq!(permissions.public, AccessMode::READ);

    let detector = Detector::new(probe);
    assert_eq!(detector.detect(Some(&info)).await, Some(AccessControlType::Wac));
}

/// Binary files are tagged `Unknown` and routed accordingly.
#[tokio::test]
async fn fetch_binary_is_unknown_kind() {
    let probe = ScriptedProbe::new().reply(
        "https://pod.example/docs/cat.jpg",
        StatusCode::OK,
        &[("content-type", "image/jpeg")],
        "JFIF",
    );
    let (_, resource) = fetch::fetch_resource(&probe, "https://pod.example/docs/cat.jpg")
        .await
        .unwrap();
    assert_eq!(resource.kind(), ResourceKind::Unknown);
    assert_eq!(resource.size, Some(4));
}

#[tokio::test]
async fn fetch_not_found_is_absence() {
    let probe = ScriptedProbe::new().reply(DOC, StatusCode::NOT_FOUND, &[], "");
    let err = fetch::fetch_resource(&probe, DOC).await.unwrap_err();
    assert!(err.is_absence());
}
