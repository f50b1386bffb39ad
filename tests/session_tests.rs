//! Tests for Session Lifecycle and Export
//!
//! These tests verify:
//! - Stage transitions (CollectingInput -> Resolved -> Exported -> reset)
//! - Per-slot re-selection leaves other slots and the price alone
//! - Export files round-trip through disk and pass validation

use designmypc::error::BuildError;
use designmypc::export::{BuildExport, DEFAULT_FILE_NAME, SCHEMA_VERSION};
use designmypc::logic::resolver::{StructuredRequest, TierPolicy};
use designmypc::session::{Session, SessionStage};
use designmypc::types::{Slot, Tier, UseCase};
use tempfile::TempDir;

fn resolved_session(use_case: UseCase, budget: f64) -> Session {
    let mut session = Session::new();
    session
        .resolve_structured(&StructuredRequest::new(use_case, budget), &TierPolicy::default())
        .unwrap();
    session
}

// =============================================================================
// Stage Transitions
// =============================================================================

#[test]
fn test_new_session_is_collecting() {
    let session = Session::new();
    assert_eq!(session.stage(), SessionStage::CollectingInput);
    assert!(session.selection().is_none());
    assert!(session.last_export().is_none());
}

#[test]
fn test_cannot_resolve_twice_without_reset() {
    let mut session = resolved_session(UseCase::Gaming, 1500.0);
    let err = session
        .resolve_structured(&StructuredRequest::new(UseCase::Gaming, 900.0), &TierPolicy::default())
        .unwrap_err();
    assert!(matches!(err, BuildError::State(_)));
    assert_eq!(session.selection().unwrap().tier(), Tier::Mid);
}

#[test]
fn test_changes_before_resolve_are_state_errors() {
    let mut session = Session::new();
    assert!(matches!(session.select_option(Slot::Cpu, 0), Err(BuildError::State(_))));
    assert!(matches!(session.snapshot(), Err(BuildError::State(_))));
}

#[test]
fn test_reset_returns_to_collecting() {
    let mut session = resolved_session(UseCase::Workstation, 5000.0);
    session.reset();
    assert_eq!(session.stage(), SessionStage::CollectingInput);
    assert!(session.selection().is_none());
}

// =============================================================================
// Slot Re-selection
// =============================================================================

#[test]
fn test_reselect_only_touches_one_slot() {
    let mut session = resolved_session(UseCase::Gaming, 3000.0);
    let before: Vec<(Slot, &str)> = session.selection().unwrap().chosen_parts().collect();
    let price = session.selection().unwrap().price();

    assert_eq!(session.select_option(Slot::Gpu, 1).unwrap(), "RX 7900 XTX");

    let selection = session.selection().unwrap();
    assert_eq!(selection.price(), price);
    assert!(selection.is_customized());
    for (slot, part) in before {
        if slot != Slot::Gpu {
            assert_eq!(selection.chosen_part(slot), part, "{} changed", slot);
        }
    }
}

#[test]
fn test_out_of_range_option_is_rejected() {
    let mut session = resolved_session(UseCase::Gaming, 800.0);
    let err = session.select_option(Slot::Ram, 1).unwrap_err();
    assert!(matches!(err, BuildError::Validation(_)));
    assert_eq!(session.selection().unwrap().chosen_part(Slot::Ram), "16GB DDR4 3200MHz");
}

#[test]
fn test_cycle_wraps_both_ways() {
    let mut session = resolved_session(UseCase::Workstation, 900.0);
    assert_eq!(session.cycle_option(Slot::Case, false).unwrap(), "be quiet! Pure Base 500");
    assert_eq!(session.cycle_option(Slot::Case, true).unwrap(), "Fractal Design Meshify C");
    // Single-option slots stay put
    assert_eq!(session.cycle_option(Slot::Psu, true).unwrap(), "750W 80+ Gold");
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_FILE_NAME);

    let mut session = resolved_session(UseCase::Gaming, 1600.0);
    session.select_option(Slot::Cpu, 1).unwrap();
    let written = session.export_to(&path).unwrap();

    assert_eq!(session.stage(), SessionStage::Exported);
    assert_eq!(session.last_export(), Some(path.as_path()));

    let loaded = BuildExport::load_from_file(&path).unwrap();
    loaded.validate().unwrap();
    assert_eq!(loaded, written);
    assert_eq!(loaded.schema_version, SCHEMA_VERSION);
    assert_eq!(loaded.build_type, "Mid Gaming");
    assert_eq!(loaded.price, 1500);
    assert_eq!(loaded.budget, Some(1600.0));
    assert_eq!(loaded.components[&Slot::Cpu], "Intel i7-13700K");
    assert_eq!(loaded.components.len(), Slot::COUNT);
}

#[test]
fn test_export_uses_display_keys() {
    let session = resolved_session(UseCase::Workstation, 2500.0);
    let json = session.snapshot().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "High Workstation");
    assert_eq!(value["category"], "Workstation");
    assert_eq!(value["components"]["CPU"], "AMD Threadripper 7980X");
    assert_eq!(value["price"], 5000);
}

#[test]
fn test_changing_a_part_after_export_returns_to_resolved() {
    let dir = TempDir::new().unwrap();
    let mut session = resolved_session(UseCase::Gaming, 1000.0);
    session.export_to(&dir.path().join(DEFAULT_FILE_NAME)).unwrap();
    session.cycle_option(Slot::Gpu, true).unwrap();
    assert_eq!(session.stage(), SessionStage::Resolved);
}

#[test]
fn test_export_to_missing_directory_fails_without_stage_change() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join(DEFAULT_FILE_NAME);
    let mut session = resolved_session(UseCase::Gaming, 1000.0);
    assert!(matches!(session.export_to(&path), Err(BuildError::Io(_))));
    assert_eq!(session.stage(), SessionStage::Resolved);
}

#[test]
fn test_validate_rejects_tampered_file() {
    let session = resolved_session(UseCase::Gaming, 1000.0);
    let mut export = session.snapshot().unwrap();
    export.components.remove(&Slot::Psu);
    assert!(export.validate().is_err());
}
