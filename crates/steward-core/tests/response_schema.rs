//! Wire-shape and JsonSchema validation tests for the response types the API
//! layer serializes.

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use steward_core::compliance::{assess_expiry, project_summary};
use steward_core::entities::*;
use steward_core::enums::*;
use steward_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn sample_compliance() -> ProjectCompliance {
    let documents = vec![
        DocumentCompliance {
            id: "doc-00000001".into(),
            document_type: "Insurance".into(),
            expiry_date: Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
            status: ComplianceStatus::Green,
            days_until_expiry: Some(213),
        },
        DocumentCompliance {
            id: "doc-00000002".into(),
            document_type: "Certification".into(),
            expiry_date: None,
            status: ComplianceStatus::Red,
            days_until_expiry: None,
        },
    ];
    ProjectCompliance {
        project_id: "prj-00000001".into(),
        project_name: "Harbour Tower".into(),
        evaluated_on: today(),
        summary: project_summary([ComplianceStatus::Red]),
        subcontractors: vec![SubcontractorCompliance {
            id: "sub-00000001".into(),
            name: "Acme Scaffolding".into(),
            status: ComplianceStatus::Red,
            documents,
        }],
    }
}

#[test]
fn project_compliance_matches_schema() {
    let value = sample_compliance();
    let schema = serde_json::to_value(schema_for!(ProjectCompliance)).unwrap();
    let instance = serde_json::to_value(&value).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn project_compliance_wire_names() {
    let instance = serde_json::to_value(sample_compliance()).unwrap();
    let sub = &instance["subcontractors"][0];
    assert_eq!(sub["status"], "RED");
    assert_eq!(sub["documents"][0]["type"], "Insurance");
    assert_eq!(sub["documents"][0]["expiry_date"], "2026-12-31");
    assert_eq!(sub["documents"][1]["expiry_date"], serde_json::Value::Null);
    assert_eq!(instance["summary"]["red_count"], 1);
}

#[test]
fn expiry_report_matches_schema() {
    let subcontractor = Subcontractor {
        id: "sub-00000001".into(),
        name: "Acme Scaffolding".into(),
        email: Some("ops@acme.test".into()),
        phone: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    };
    let context = DocumentContext {
        document: ComplianceDocument {
            id: "doc-00000001".into(),
            subcontractor_id: subcontractor.id.clone(),
            document_type: "Insurance".into(),
            storage_ref: "uploads/compliance/a.pdf".into(),
            expiry_date: Some(NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()),
            uploaded_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        },
        subcontractor,
        projects: vec![Project {
            id: "prj-00000001".into(),
            name: "Harbour Tower".into(),
            location: Some("Pier 4".into()),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }],
    };
    let assessment = assess_expiry(context.document.expiry_date, today());
    let report = ExpiryReport {
        evaluated_on: today(),
        threshold_days: 30,
        total_documents: 1,
        notices: vec![ExpiryNotice::from_context(&context, assessment)],
    };

    assert!(report.requires_attention());
    assert_eq!(report.notices[0].state, ExpiryState::Expired);
    assert_eq!(report.notices[0].days_until_expiry, Some(-12));
    assert_eq!(report.notices[0].project_names, vec!["Harbour Tower".to_string()]);

    let schema = serde_json::to_value(schema_for!(ExpiryReport)).unwrap();
    let instance = serde_json::to_value(&report).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn user_credential_is_not_serialized() {
    let user = User {
        id: "usr-00000001".into(),
        username: "foreman1".into(),
        role: UserRole::Foreman,
        credential_ref: "vault:users/foreman1".into(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("credential_ref").is_none());
    assert_eq!(json["role"], "foreman");

    let back: User = serde_json::from_value(json).unwrap();
    assert!(back.credential_ref.is_empty());
}
