//! Controller task
//!
//! The single owner of the appliance. Waits for a command, a key event or
//! the next appliance deadline, whichever comes first. Expired timers are
//! always handled before the input that woke the task, so a key arriving
//! just after the entry deadline cannot cancel the timeout.

use embassy_futures::select::{select3, Either3};
use embassy_time::{Instant, Timer};

use streetwise_core::config::ApplianceConfig;
use streetwise_core::traits::DisplayDriver;
use streetwise_core::{Appliance, Notice};

use super::StartupError;
use crate::channels::{ApplianceChannels, Command, NumberPublisher};

/// Controller task - main coordination loop
///
/// Initializes the display, then serves commands until
/// [`Command::Destroy`], after which the keypad task is told to release
/// its device and the display driver is handed back.
pub async fn run_controller<D: DisplayDriver>(
    channels: &ApplianceChannels,
    config: ApplianceConfig,
    display: D,
) -> Result<Option<D>, StartupError> {
    info!("Controller task started");

    let mut appliance = Appliance::new(&config);
    if let Err(e) = appliance.initialize(display) {
        error!("Display init failed: {:?}", e);
        // The appliance never runs, so the keyboard must not stay open
        channels.keypad_release.signal(());
        return Err(StartupError::Display(e));
    }
    info!("Display initialized");

    let publisher = channels.numbers.immediate_publisher();

    loop {
        let wake = appliance
            .next_deadline()
            .map_or(Instant::MAX, Instant::from_millis);

        let woken = select3(
            channels.commands.receive(),
            channels.keys.receive(),
            Timer::at(wake),
        )
        .await;

        let now = now_ms();
        if appliance.scope_due(now) {
            let frame = channels.audio.try_take();
            appliance.sample_audio(now, frame.as_deref());
        }
        appliance.poll(now);

        match woken {
            Either3::First(Command::Destroy) => {
                let display = appliance.destroy();
                channels.keypad_release.signal(());
                report(&mut appliance, &publisher);
                info!("Appliance destroyed");
                return Ok(display);
            }
            Either3::First(command) => {
                debug!("Command: {:?}", command);
                execute(&mut appliance, channels, command, now);
            }
            Either3::Second(event) => appliance.handle_key(event, now),
            Either3::Third(()) => {}
        }

        report(&mut appliance, &publisher);
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

fn execute<D: DisplayDriver>(
    appliance: &mut Appliance<D>,
    channels: &ApplianceChannels,
    command: Command,
    now: u64,
) {
    match command {
        Command::EnableUserInput { fade } => appliance.enable_user_input(fade, now),
        Command::BlockUserInput => appliance.block_user_input(),
        Command::DisplayNumber(number) => appliance.display_number(number),
        Command::DisplayProgress {
            start_deg,
            sweep_deg,
        } => appliance.display_indeterminate_progress(start_deg, sweep_deg),
        Command::ClearDisplay => appliance.clear_display(),
        Command::StartOscilloscope => {
            // Frames captured while stopped are stale
            channels.audio.reset();
            appliance.start_oscilloscope(now);
        }
        Command::StopOscilloscope => appliance.stop_oscilloscope(),
        Command::StartSpinner => appliance.start_progress_spinner(now),
        Command::StopSpinner(then) => appliance.stop_progress_spinner(then),
        // Handled by the task loop
        Command::Destroy => {}
    }
}

/// Log pending notices and publish completed question numbers
fn report<D: DisplayDriver>(appliance: &mut Appliance<D>, publisher: &NumberPublisher<'_>) {
    while let Some(notice) = appliance.pop_notice() {
        match notice {
            Notice::DigitAccepted(digit) => trace!("Digit accepted: {}", digit),
            Notice::PartialInputCleared => debug!("Clearing partial input"),
            Notice::EntryTimedOut => debug!("Entry timed out, listening again"),
            Notice::FadeExpired => debug!("Fade window over"),
            Notice::FadeCancelled => debug!("Fade cancelled by input"),
            Notice::QuestionNumber(number) => {
                info!("Question number: {}", number);
                publisher.publish_immediate(number);
            }
            Notice::EntryRejected => warn!("Completed entry is not a number, discarded"),
            Notice::InputBlockedForNumber => {
                warn!("Number displayed while input was enabled, input blocked")
            }
            Notice::DisplayFault(e) => warn!("Display fault: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{run_audio, run_keypad, KeypadError};
    use crate::testing::{
        short_config, tap, Drawn, RecordingDisplay, ScriptedAudio, ScriptedKeys, Step,
    };
    use embassy_futures::block_on;
    use embassy_futures::join::{join, join3};
    use streetwise_core::traits::DisplayError;
    use streetwise_core::QuestionNumber;

    const KEY_1: u16 = 2;
    const KEY_2: u16 = 3;
    const KEY_3: u16 = 4;
    const KEY_4: u16 = 5;
    const KEY_5: u16 = 6;
    const KEY_KP6: u16 = 77;
    const KEY_7: u16 = 8;
    const KEY_8: u16 = 9;
    const KEY_Q: u16 = 16;

    #[test]
    fn test_entry_publishes_one_number() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();
        let mut numbers = handle.question_numbers().unwrap();

        let mut script = std::vec![Step::Wait(20)];
        for code in [KEY_1, KEY_Q, KEY_2, KEY_3, KEY_4] {
            script.extend(tap(code));
        }

        let (display, keypad, ()) = block_on(join3(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            run_keypad(&channels, ScriptedKeys::new(script)),
            async {
                handle.enable_user_input(false).await;
                let number = numbers.next_message_pure().await;
                assert_eq!(number, QuestionNumber::new(1234).unwrap());
                handle.destroy().await;
            },
        ));

        keypad.unwrap();
        let display = display.unwrap().unwrap();
        assert!(display.drawn.contains(&Drawn::Text("1234".into())));
        assert_eq!(numbers.try_next_message_pure(), None);
    }

    #[test]
    fn test_timeout_keeps_pipeline_alive() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();
        let mut numbers = handle.question_numbers().unwrap();

        // Entry timeout is 50 ms: the lone 1 is abandoned
        let mut script = std::vec![Step::Wait(10)];
        script.extend(tap(KEY_1));
        script.push(Step::Wait(150));
        for code in [KEY_5, KEY_KP6, KEY_7, KEY_8] {
            script.extend(tap(code));
        }

        let (display, keypad, ()) = block_on(join3(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            run_keypad(&channels, ScriptedKeys::new(script)),
            async {
                handle.enable_user_input(false).await;
                let number = numbers.next_message_pure().await;
                assert_eq!(number, QuestionNumber::new(5678).unwrap());
                handle.destroy().await;
            },
        ));

        keypad.unwrap();
        let display = display.unwrap().unwrap();
        let texts: std::vec::Vec<_> = display
            .drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["1___", "5___", "56__", "567_", "5678"]);
    }

    #[test]
    fn test_display_startup_failure() {
        let channels = ApplianceChannels::new();
        let result = block_on(run_controller(
            &channels,
            short_config(),
            RecordingDisplay::failing(),
        ));
        assert_eq!(
            result.err(),
            Some(StartupError::Display(DisplayError::NotResponding))
        );
    }

    #[test]
    fn test_display_failure_releases_keypad() {
        let channels = ApplianceChannels::new();

        let (display, keypad) = block_on(join(
            run_controller(&channels, short_config(), RecordingDisplay::failing()),
            run_keypad(&channels, ScriptedKeys::new(std::vec![])),
        ));

        assert!(display.is_err());
        assert_eq!(keypad, Ok(()));
    }

    #[test]
    fn test_keypad_started_after_destroy_closes() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();

        let (display, ()) = block_on(join(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            async {
                handle.destroy().await;
            },
        ));
        assert!(display.unwrap().is_some());

        // The release is still pending for a keypad task that starts late
        let keypad = block_on(run_keypad(&channels, ScriptedKeys::new(std::vec![])));
        assert_eq!(keypad, Ok(()));
    }

    #[test]
    fn test_keypad_startup_failure() {
        let channels = ApplianceChannels::new();
        let result = block_on(run_keypad(&channels, ScriptedKeys::unavailable()));
        assert_eq!(result, Err(StartupError::Keypad(KeypadError::Unavailable)));
    }

    #[test]
    fn test_destroy_releases_keypad() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();

        let (display, keypad, ()) = block_on(join3(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            run_keypad(&channels, ScriptedKeys::new(std::vec![])),
            async {
                handle.destroy().await;
            },
        ));

        assert!(keypad.is_ok());
        let display = display.unwrap().unwrap();
        // Never enabled: only the startup blank
        assert_eq!(display.flushes, 1);
    }

    #[test]
    fn test_fade_expires_then_clears() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();
        let number = QuestionNumber::new(4321).unwrap();

        let (display, ()) = block_on(join(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            async {
                handle.display_number(number).await;
                handle.enable_user_input(true).await;
                Timer::after_millis(40).await;
                handle.clear_display().await;
                // Fade window is 100 ms
                Timer::after_millis(200).await;
                handle.destroy().await;
            },
        ));

        let display = display.unwrap().unwrap();
        // Startup blank, the number, then exactly one blank at fade expiry
        assert_eq!(display.flushes, 3);
        assert!(display.is_blank());
    }

    #[test]
    fn test_oscilloscope_draws_latest_frames() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();

        let (display, (), ()) = block_on(join3(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            run_audio(&channels, ScriptedAudio::new(40, 2)),
            async {
                handle.start_oscilloscope().await;
                Timer::after_millis(150).await;
                handle.stop_oscilloscope().await;
                handle.destroy().await;
            },
        ));

        let display = display.unwrap().unwrap();
        let lines = display
            .drawn
            .iter()
            .filter(|d| matches!(d, Drawn::Line(..)))
            .count();
        assert!(lines > 0);
        // One column per 8 samples of a 1024-sample frame
        assert_eq!(lines % 128, 0);
        assert!(display.is_blank());
    }

    #[test]
    fn test_spinner_then_number() {
        let channels = ApplianceChannels::new();
        let handle = channels.handle();
        let number = QuestionNumber::new(1111).unwrap();

        let (display, ()) = block_on(join(
            run_controller(&channels, short_config(), RecordingDisplay::new()),
            async {
                handle.start_progress_spinner().await;
                Timer::after_millis(60).await;
                handle.stop_progress_spinner(Some(number)).await;
                handle.destroy().await;
            },
        ));

        let display = display.unwrap().unwrap();
        let arcs: std::vec::Vec<i32> = display
            .drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Arc(start, _) => Some(*start),
                _ => None,
            })
            .collect();
        assert!(arcs.len() >= 2);
        assert_eq!(arcs[0], 0);
        assert_eq!(arcs[1], -2);
        assert!(display.drawn.contains(&Drawn::Text("1111".into())));
    }
}
