use npc_core::Status;

#[test]
fn invert_swaps_terminal_statuses() {
    assert_eq!(Status::Finished.invert(), Status::Failed);
    assert_eq!(Status::Failed.invert(), Status::Finished);
}

#[test]
fn invert_treats_blocked_as_success_and_keeps_running() {
    assert_eq!(Status::CanNotExecute.invert(), Status::Finished);
    assert_eq!(Status::Running.invert(), Status::Running);
}

#[test]
fn double_inversion_is_identity_for_terminal_statuses() {
    for status in [Status::Finished, Status::Failed] {
        assert_eq!(status.invert().invert(), status);
    }
}

#[test]
fn default_status_is_unknown() {
    assert_eq!(Status::default(), Status::Unknown);
    assert!(!Status::Unknown.is_terminal());
    assert!(Status::Finished.is_terminal());
    assert!(Status::Failed.is_terminal());
}
