mod tests {
    use myrtio_light_remote::{Control, LinkFault, LinkStatus, SendStats, SendStatusTracker};

    fn text(status: LinkStatus) -> String {
        format!("{status}")
    }

    #[test]
    fn test_initial_state() {
        let tracker = SendStatusTracker::new();
        assert!(!tracker.last_send_success());
        assert_eq!(tracker.stats(), SendStats::default());
        assert_eq!(tracker.status(), LinkStatus::Initializing);
        assert_eq!(tracker.stats_line().as_str(), "Sent: 0 | Requests: 0");
    }

    #[test]
    fn test_send_completion() {
        let mut tracker = SendStatusTracker::new();
        tracker.on_send_complete(true);
        assert!(tracker.last_send_success());
        assert_eq!(tracker.stats().commands_sent, 1);
        assert_eq!(tracker.status(), LinkStatus::Connected);

        tracker.on_send_complete(false);
        assert!(!tracker.last_send_success());
        assert_eq!(tracker.stats().commands_sent, 1);
        assert_eq!(tracker.stats().send_failures, 1);
        assert_eq!(tracker.status(), LinkStatus::SendFailed);
        assert!(tracker.status().is_error());
    }

    #[test]
    fn test_counters() {
        let mut tracker = SendStatusTracker::new();
        tracker.record_attempt();
        tracker.record_attempt();
        tracker.record_request();
        tracker.record_hand_off_failure();
        tracker.on_send_complete(true);

        assert_eq!(
            tracker.stats(),
            SendStats {
                send_attempts: 2,
                commands_sent: 1,
                send_failures: 1,
                requests_received: 1,
            }
        );
        assert_eq!(tracker.stats_line().as_str(), "Sent: 1 | Requests: 1");
    }

    #[test]
    fn test_stats_line_fits_max_counters() {
        let mut tracker = SendStatusTracker::new();
        for _ in 0..3 {
            tracker.record_request();
        }
        assert_eq!(tracker.stats_line().as_str(), "Sent: 0 | Requests: 3");
        let line = format!("Sent: {} | Requests: {}", u32::MAX, u32::MAX);
        assert!(line.len() <= myrtio_light_remote::status::STATS_LINE_CAPACITY);
    }

    #[test]
    fn test_fault_hides_transient_status() {
        let mut tracker = SendStatusTracker::new();
        tracker.set_fault(LinkFault::PeerRegistrationFailed);
        tracker.note(LinkStatus::Updated(Control::Color));
        assert_eq!(tracker.status(), LinkStatus::Fault(LinkFault::PeerRegistrationFailed));
        assert_eq!(text(tracker.status()), "Peer Add Failed!");

        tracker.clear_fault();
        assert_eq!(tracker.status(), LinkStatus::Updated(Control::Color));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(text(LinkStatus::Ready), "ESP-NOW Ready");
        assert_eq!(text(LinkStatus::Connected), "Connected");
        assert_eq!(text(LinkStatus::SendFailed), "Send Failed!");
        assert_eq!(text(LinkStatus::SendError), "Send Error!");
        assert_eq!(text(LinkStatus::RequestReceived), "Request received");
        assert_eq!(text(LinkStatus::Updated(Control::Color)), "Color updated");
        assert_eq!(text(LinkStatus::Updated(Control::WarmWhite)), "Warm updated");
        assert_eq!(text(LinkStatus::Fault(LinkFault::TransportInitFailed)), "ESP-NOW Init Failed!");
        assert!(!LinkStatus::Connected.is_error());
        assert!(LinkStatus::Fault(LinkFault::TransportInitFailed).is_error());
    }
}
