//! Site task
//!
//! Owns the `Site` and is the only place its state changes. Each loop waits
//! for whichever comes first: the site's next deadline, a user command, or
//! the end of the run.

use core::future::pending;

use embassy_futures::select::{select3, Either3};
use embassy_time::{Duration, Instant, Timer};
use tracing::{debug, info, trace, warn};
use zbot_core::site::Site;
use zbot_core::state::Event;
use zbot_core::timer::Millis;
use zbot_core::traits::{drain, Animated};
use zbot_display::Renderer;

use crate::channels::{INPUT_CHANNEL, SCREEN_BUFFER, SCREEN_UPDATE};
use crate::tasks::input::Command;

/// Counters printed when the run ends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub events: u32,
    pub timer_events: u32,
    pub commands: u32,
    pub ignored: u32,
    pub runs_finished: u32,
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The site produced an event
    Event(Event),
    /// Schedule edited; edits have no event of their own
    Edited,
    /// Wrong view, run already in progress or stage out of range
    Ignored,
}

impl From<Option<Event>> for Outcome {
    fn from(event: Option<Event>) -> Self {
        event.map_or(Outcome::Ignored, Outcome::Event)
    }
}

/// Apply one command at `now_ms`
///
/// `Quit` is handled by the caller and is always `Ignored` here.
pub fn apply(site: &mut Site, command: Command, now_ms: Millis) -> Outcome {
    match command {
        Command::Start => site.start_demo(now_ms).into(),
        Command::Select(index) => site.select_stage(index, now_ms).into(),
        Command::Next => site.next_tour_step().into(),
        Command::Close if site.is_story_open() => site.close_story().into(),
        Command::Close => site.close_tour().into(),
        Command::Toggle(day) => match site.toggle_day(day) {
            Some(_) => Outcome::Edited,
            None => Outcome::Ignored,
        },
        Command::Time(start) => {
            if site.set_start_time(start) {
                Outcome::Edited
            } else {
                Outcome::Ignored
            }
        }
        Command::Save => site.save_schedule(now_ms).into(),
        Command::Story => site.open_story().into(),
        Command::Go(section) => site.follow_link(section).into(),
        Command::Preorder => site.open_preorder().into(),
        Command::Back => site.back_to_landing(now_ms).into(),
        Command::Menu => site.toggle_menu().into(),
        Command::Quit => Outcome::Ignored,
    }
}

fn log_event(event: Event, at_ms: Millis, stats: &mut RunStats) {
    stats.events += 1;
    if event.is_timer_event() {
        stats.timer_events += 1;
    }
    match event {
        Event::UnitCleaned(_) | Event::UnitSkipped(_) => trace!("{} ms: {:?}", at_ms, event),
        Event::CleaningFinished => {
            stats.runs_finished += 1;
            info!("{} ms: {:?}", at_ms, event);
        }
        _ if event.is_demo_event() => debug!("{} ms: {:?}", at_ms, event),
        _ => info!("{} ms: {:?}", at_ms, event),
    }
}

async fn publish(site: &Site, renderer: &mut Renderer) {
    renderer.render_site(site);
    *SCREEN_BUFFER.lock().await = renderer.screen().clone();
    SCREEN_UPDATE.signal(());
}

/// Run the site until `Quit` or `stop_after_ms`
#[embassy_executor::task]
pub async fn site_task(mut site: Site, origin: Instant, stop_after_ms: Option<Millis>) {
    info!("Site task started");

    let now_ms = || origin.elapsed().as_millis();
    let mut renderer = Renderer::new();
    let mut stats = RunStats::default();

    site.mount(now_ms());
    publish(&site, &mut renderer).await;

    loop {
        let deadline = site.next_deadline();
        let wake = async {
            match deadline {
                Some(due) => Timer::at(origin + Duration::from_millis(due)).await,
                None => pending::<()>().await,
            }
        };
        let stop = async {
            match stop_after_ms {
                Some(ms) => Timer::at(origin + Duration::from_millis(ms)).await,
                None => pending::<()>().await,
            }
        };

        match select3(wake, INPUT_CHANNEL.receive(), stop).await {
            Either3::First(()) => {
                let now = now_ms();
                let fired = drain(&mut site, now, |e| log_event(e, now, &mut stats));
                if fired > 0 {
                    publish(&site, &mut renderer).await;
                }
            }

            Either3::Second(Command::Quit) => {
                info!("Quit requested");
                break;
            }

            Either3::Second(command) => {
                let now = now_ms();
                // Timers that came due while the command was queued fire first
                drain(&mut site, now, |e| log_event(e, now, &mut stats));

                stats.commands += 1;
                match apply(&mut site, command, now) {
                    Outcome::Event(event) => log_event(event, now, &mut stats),
                    Outcome::Edited => debug!("{} ms: schedule edited", now),
                    Outcome::Ignored => {
                        stats.ignored += 1;
                        warn!("{} ms: `{}` ignored in {:?}", now, command.name(), site.view());
                    }
                }
                publish(&site, &mut renderer).await;
            }

            Either3::Third(()) => {
                info!("Run time elapsed");
                break;
            }
        }
    }

    site.unmount();
    info!(
        "Stopped after {} ms: {} events ({} from timers), {} commands ({} ignored), {} demo runs, {} units cleaned",
        now_ms(),
        stats.events,
        stats.timer_events,
        stats.commands,
        stats.ignored,
        stats.runs_finished,
        site.demo().completed_units().len()
    );
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbot_core::config::ShowcaseConfig;
    use zbot_core::site::{Section, Weekday};
    use zbot_core::state::View;

    fn landing() -> Site {
        let mut site = Site::new(&ShowcaseConfig::default()).unwrap();
        site.mount(0);
        drain(&mut site, 3530, |_| {});
        site
    }

    #[test]
    fn test_apply_ignored_while_loading() {
        let mut site = Site::new(&ShowcaseConfig::default()).unwrap();
        site.mount(0);
        assert_eq!(apply(&mut site, Command::Start, 10), Outcome::Ignored);
        assert_eq!(apply(&mut site, Command::Menu, 10), Outcome::Ignored);
    }

    #[test]
    fn test_apply_landing_commands() {
        let mut site = landing();
        assert_eq!(apply(&mut site, Command::Start, 3600), Outcome::Event(Event::Start));
        assert_eq!(apply(&mut site, Command::Start, 3700), Outcome::Ignored);
        assert_eq!(
            apply(&mut site, Command::Select(2), 3700),
            Outcome::Event(Event::StageSelected(2))
        );
        assert_eq!(apply(&mut site, Command::Select(9), 3700), Outcome::Ignored);
        assert_eq!(apply(&mut site, Command::Save, 3700), Outcome::Event(Event::ScheduleSaved));
        assert_eq!(apply(&mut site, Command::Menu, 3700), Outcome::Event(Event::MenuToggled(true)));
    }

    #[test]
    fn test_schedule_edits() {
        let mut site = landing();
        assert_eq!(apply(&mut site, Command::Toggle(Weekday::Sun), 3600), Outcome::Edited);
        assert!(site.schedule().days().contains(Weekday::Sun));
    }

    #[test]
    fn test_apply_navigation() {
        let mut site = landing();
        assert_eq!(apply(&mut site, Command::Back, 3600), Outcome::Ignored);
        assert_eq!(
            apply(&mut site, Command::Preorder, 3600),
            Outcome::Event(Event::OpenPreorder)
        );
        assert_eq!(site.view(), View::Preorder);
        assert_eq!(
            apply(&mut site, Command::Back, 3700),
            Outcome::Event(Event::BackToLanding)
        );
        assert_eq!(site.view(), View::Landing);
    }

    #[test]
    fn test_log_event_counts() {
        let mut stats = RunStats::default();
        log_event(Event::UnitCleaned(3), 0, &mut stats);
        log_event(Event::CleaningFinished, 0, &mut stats);
        log_event(Event::StoryOpened, 0, &mut stats);
        assert_eq!(stats.events, 3);
        assert_eq!(stats.timer_events, 2);
        assert_eq!(stats.runs_finished, 1);
    }

    #[test]
    fn test_close_targets_topmost_overlay() {
        let mut site = landing();
        // Tour prompt fires 2000 ms after loading
        drain(&mut site, 5530, |_| {});
        assert!(site.is_tour_visible());

        assert_eq!(apply(&mut site, Command::Story, 5600), Outcome::Event(Event::StoryOpened));
        assert_eq!(apply(&mut site, Command::Close, 5700), Outcome::Event(Event::StoryClosed));
        assert!(site.is_tour_visible());
        assert_eq!(apply(&mut site, Command::Close, 5800), Outcome::Event(Event::TourClosed));
        assert_eq!(apply(&mut site, Command::Close, 5900), Outcome::Ignored);
    }

    #[test]
    fn test_go_closes_menu() {
        let mut site = landing();
        apply(&mut site, Command::Menu, 3600);
        assert_eq!(
            apply(&mut site, Command::Go(Section::Mapping), 3700),
            Outcome::Event(Event::SectionLinked(Section::Mapping))
        );
        assert!(!site.is_menu_open());
    }
}
