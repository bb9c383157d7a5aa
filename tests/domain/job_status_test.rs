use pdf_analyzer::domain::JobStatus;

const ALL: [JobStatus; 4] = [
    JobStatus::Queued,
    JobStatus::Processing,
    JobStatus::Completed,
    JobStatus::Failed,
];

#[test]
fn given_queued_job_when_checking_transitions_then_all_forward_moves_allowed() {
    assert!(JobStatus::Queued.can_transition_to(JobStatus::Processing));
    assert!(JobStatus::Queued.can_transition_to(JobStatus::Completed));
    assert!(JobStatus::Queued.can_transition_to(JobStatus::Failed));
    assert!(!JobStatus::Queued.can_transition_to(JobStatus::Queued));
}

#[test]
fn given_processing_job_when_checking_transitions_then_only_terminal_allowed() {
    assert!(JobStatus::Processing.can_transition_to(JobStatus::Completed));
    assert!(JobStatus::Processing.can_transition_to(JobStatus::Failed));
    assert!(!JobStatus::Processing.can_transition_to(JobStatus::Queued));
    assert!(!JobStatus::Processing.can_transition_to(JobStatus::Processing));
}

#[test]
fn given_terminal_status_when_checking_transitions_then_nothing_allowed() {
    for terminal in [JobStatus::Completed, JobStatus::Failed] {
        assert!(terminal.is_terminal());
        for next in ALL {
            assert!(!terminal.can_transition_to(next));
        }
    }
}

#[test]
fn given_status_when_displayed_then_parses_back() {
    for status in ALL {
        assert_eq!(status.to_string().parse::<JobStatus>().unwrap(), status);
    }
    assert!("COMPLETED".parse::<JobStatus>().is_err());
}

#[test]
fn given_status_when_serialized_then_uses_lowercase_name() {
    let json = serde_json::to_string(&JobStatus::Processing).unwrap();
    assert_eq!(json, "\"processing\"");
}
