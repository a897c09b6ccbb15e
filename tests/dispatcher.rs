mod common;

mod tests {
    use myrtio_light_remote::{
        COMMAND_SIZE, DispatchOutcome, DispatchPolicy, Dispatcher, Instant, LedCommand,
        SendTrigger, TransportError, TriggerPolicy,
    };

    use crate::common::{RECEIVER, RecordingTransport};

    struct Harness {
        dispatcher: Dispatcher,
        transport: RecordingTransport,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_policy(DispatchPolicy::DEFAULT)
        }

        fn with_policy(policy: DispatchPolicy) -> Self {
            Self {
                dispatcher: Dispatcher::new(policy),
                transport: RecordingTransport::connected(),
            }
        }

        fn evaluate(
            &mut self,
            command: &LedCommand,
            trigger: SendTrigger,
            at: u64,
        ) -> DispatchOutcome {
            let now = Instant::from_millis(at);
            self.dispatcher.evaluate(command, trigger, now, &mut self.transport, RECEIVER)
        }

        fn change(&mut self, command: &LedCommand, at: u64) -> DispatchOutcome {
            self.evaluate(command, SendTrigger::StateChange, at)
        }

        fn sent(&self) -> usize {
            self.transport.sent.len()
        }
    }

    fn green() -> LedCommand {
        LedCommand {
            red: 0,
            green: 255,
            ..LedCommand::new()
        }
    }

    #[test]
    fn test_first_evaluation_sends() {
        let mut harness = Harness::new();

        assert_eq!(harness.change(&LedCommand::new(), 0), DispatchOutcome::Sent);
        assert_eq!(harness.sent(), 1);
        assert_eq!(harness.transport.sent[0].peer, RECEIVER);
        assert_eq!(harness.transport.sent[0].bytes, [255, 0, 0, 0, 0, 16, 0, 50]);
        assert_eq!(harness.dispatcher.last_send_at(), Some(Instant::from_millis(0)));
        assert_eq!(harness.dispatcher.in_flight(), 1);
    }

    #[test]
    fn test_unchanged_state_is_not_resent() {
        let mut harness = Harness::new();
        let command = LedCommand::new();

        harness.change(&command, 0);
        assert_eq!(harness.change(&command, 500), DispatchOutcome::Unchanged);
        assert_eq!(harness.sent(), 1);

        // Still unchanged once the send is confirmed
        harness.dispatcher.on_send_complete(true);
        assert_eq!(harness.change(&command, 900), DispatchOutcome::Unchanged);
        assert_eq!(harness.dispatcher.last_confirmed(), Some(command));
    }

    #[test]
    fn test_changed_state_sends_new_encoding() {
        let mut harness = Harness::new();

        harness.change(&LedCommand::new(), 0);
        harness.dispatcher.on_send_complete(true);
        assert_eq!(harness.change(&green(), 100), DispatchOutcome::Sent);
        assert_eq!(harness.sent(), 2);
        assert_eq!(harness.transport.last_command(), Some(green()));
    }

    #[test]
    fn test_every_wire_byte_is_change_detected() {
        let mut harness = Harness::new();
        let mut previous = LedCommand::new();
        let mut at = 0;
        harness.change(&previous, at);

        for index in 0..COMMAND_SIZE {
            let mut bytes = previous.to_bytes();
            bytes[index] = bytes[index].wrapping_add(1);
            let next = LedCommand::from_bytes(&bytes).unwrap();
            at += 100;

            assert_eq!(harness.change(&next, at), DispatchOutcome::Sent);
            assert_eq!(harness.change(&next, at + 60), DispatchOutcome::Unchanged);
            assert_eq!(harness.sent(), index + 2);
            assert_eq!(harness.transport.sent[index + 1].bytes, bytes);
            previous = next;
        }
    }

    #[test]
    fn test_rate_limit_drops_second_send() {
        let mut harness = Harness::new();

        harness.change(&LedCommand::new(), 0);
        assert_eq!(harness.change(&green(), 49), DispatchOutcome::RateLimited);
        assert_eq!(harness.sent(), 1);

        assert_eq!(harness.change(&green(), 50), DispatchOutcome::Sent);
        assert_eq!(harness.transport.last_command(), Some(green()));
    }

    #[test]
    fn test_heartbeat_skips_change_detection_but_not_rate_limit() {
        let mut harness = Harness::new();
        let command = LedCommand::new();

        harness.change(&command, 0);
        let outcome = harness.evaluate(&command, SendTrigger::Heartbeat, 10);
        assert_eq!(outcome, DispatchOutcome::RateLimited);

        let outcome = harness.evaluate(&command, SendTrigger::Heartbeat, 5000);
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(harness.sent(), 2);
        assert_eq!(harness.transport.sent[0], harness.transport.sent[1]);
    }

    #[test]
    fn test_resync_skips_rate_limit() {
        let mut harness = Harness::new();
        let command = LedCommand::new();

        harness.change(&command, 0);
        let outcome = harness.evaluate(&command, SendTrigger::Resync, 1);
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(harness.sent(), 2);
    }

    #[test]
    fn test_failed_delivery_is_resent_on_next_trigger() {
        let mut harness = Harness::new();

        harness.change(&LedCommand::new(), 0);
        harness.dispatcher.on_send_complete(true);
        harness.change(&green(), 100);
        harness.dispatcher.on_send_complete(false);

        assert_eq!(harness.dispatcher.last_confirmed(), Some(LedCommand::new()));
        assert_eq!(harness.dispatcher.in_flight(), 0);
        assert_eq!(harness.change(&green(), 200), DispatchOutcome::Sent);
        assert_eq!(harness.sent(), 3);
    }

    #[test]
    fn test_completions_resolve_in_hand_off_order() {
        let mut harness = Harness::new();

        harness.change(&LedCommand::new(), 0);
        harness.change(&green(), 100);
        assert_eq!(harness.dispatcher.in_flight(), 2);

        harness.dispatcher.on_send_complete(true);
        assert_eq!(harness.dispatcher.last_confirmed(), Some(LedCommand::new()));
        harness.dispatcher.on_send_complete(true);
        assert_eq!(harness.dispatcher.last_confirmed(), Some(green()));

        // Spurious completion is ignored
        harness.dispatcher.on_send_complete(false);
        assert_eq!(harness.dispatcher.last_confirmed(), Some(green()));
    }

    #[test]
    fn test_forget_in_flight_falls_back_to_confirmed() {
        let mut harness = Harness::new();

        harness.change(&LedCommand::new(), 0);
        harness.dispatcher.on_send_complete(true);
        harness.change(&green(), 100);
        assert_eq!(harness.change(&green(), 200), DispatchOutcome::Unchanged);

        harness.dispatcher.forget_in_flight();
        assert_eq!(harness.dispatcher.in_flight(), 0);
        assert_eq!(harness.change(&green(), 300), DispatchOutcome::Sent);
        assert_eq!(harness.change(&LedCommand::new(), 400), DispatchOutcome::Sent);
    }

    #[test]
    fn test_hand_off_failure_does_not_start_rate_limit() {
        let mut harness = Harness::new();
        harness.transport.fail_send = Some(TransportError::Busy);
        let command = LedCommand::new();

        let outcome = harness.change(&command, 0);
        assert_eq!(outcome, DispatchOutcome::Failed(TransportError::Busy));
        assert_eq!(harness.dispatcher.last_send_at(), None);
        assert_eq!(harness.dispatcher.in_flight(), 0);

        harness.transport.fail_send = None;
        assert_eq!(harness.change(&command, 1), DispatchOutcome::Sent);
    }

    #[test]
    fn test_custom_policy() {
        let policy = DispatchPolicy {
            resync: TriggerPolicy::FORCED,
            ..DispatchPolicy::DEFAULT
        };
        let mut harness = Harness::with_policy(policy);
        let command = LedCommand::new();

        harness.change(&command, 0);
        let outcome = harness.evaluate(&command, SendTrigger::Resync, 1);
        assert_eq!(outcome, DispatchOutcome::RateLimited);
    }
}
