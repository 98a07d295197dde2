use gunw_core::{JobRecord, JobStatus};
use jiff::Timestamp;

fn parse(json: &str) -> JobRecord {
    serde_json::from_str(json).unwrap()
}

const SUCCEEDED_JOB: &str = r#"{
    "job_id": "27836b79-e5b2-4d8f-932f-659724ea02c3",
    "job_type": "INSAR_ISCE",
    "status_code": "SUCCEEDED",
    "name": "TibetA_165",
    "user_id": "access_cloud_based_insar",
    "request_time": "2022-05-11T10:00:00+00:00",
    "expiration_time": "2022-05-26T00:00:00+00:00",
    "credit_cost": 1,
    "files": [
        {
            "filename": "S1-GUNW-A-R-165.nc",
            "size": 61234567,
            "url": "https://example.com/S1-GUNW-A-R-165.nc",
            "s3": {"bucket": "hyp3-tibet-contentbucket", "key": "27836b79/S1-GUNW-A-R-165.nc"}
        }
    ]
}"#;

#[test]
fn parses_hyp3_job_payload() {
    let job = parse(SUCCEEDED_JOB);
    assert_eq!(job.status_code, JobStatus::Succeeded);
    assert!(job.succeeded());
    assert_eq!(job.name.as_deref(), Some("TibetA_165"));
    let primary = job.primary_artifact().unwrap();
    assert_eq!(primary.bucket, "hyp3-tibet-contentbucket");
    assert_eq!(primary.key, "27836b79/S1-GUNW-A-R-165.nc");
}

#[test]
fn expiry_compares_against_now() {
    let job = parse(SUCCEEDED_JOB);
    let before: Timestamp = "2022-05-20T00:00:00Z".parse().unwrap();
    let at: Timestamp = "2022-05-26T00:00:00Z".parse().unwrap();
    let after: Timestamp = "2023-01-01T00:00:00Z".parse().unwrap();

    assert!(!job.is_expired_at(before));
    assert!(job.is_expired_at(at));
    assert!(job.is_expired_at(after));
}

#[test]
fn job_without_expiration_never_expires() {
    let job = parse(
        r#"{"job_id": "j1", "job_type": "INSAR_ISCE", "status_code": "RUNNING"}"#,
    );
    assert!(!job.is_expired_at(Timestamp::MAX));
    assert!(!job.succeeded());
    assert!(job.files.is_empty());
}

#[test]
fn unrecognized_status_maps_to_unknown() {
    let job = parse(r#"{"job_id": "j1", "job_type": "RTC_GAMMA", "status_code": "CANCELLED"}"#);
    assert_eq!(job.status_code, JobStatus::Unknown);
}
