//! Screen rendering
//!
//! Builds text screens from component state. Each `render_*` call clears the
//! buffer and lays the section out from the top.
//!
//! Grid cells use two characters:
//!
//! | Glyph | Meaning            |
//! |-------|--------------------|
//! | `. `  | not scanned yet    |
//! | `o `  | mapped             |
//! | `* `  | cleaned            |
//! | `##`  | wall               |
//! | `R `  | robot              |

use core::fmt::Write;

use heapless::String;
use zbot_core::carousel::{CycleCarousel, StageStatus, CLEANING_STAGES};
use zbot_core::sequencer::{DemoSequencer, UnitState};
use zbot_core::site::{
    LoadingScreen, ProductTour, ScheduleEditor, Section, Site, Weekday, TOUR_STEPS,
};
use zbot_core::state::{Phase, View};

use crate::screen::{Screen, LINE_LEN, SCREEN_COLS};

/// Width of progress bars in characters
const BAR_WIDTH: usize = 20;

/// Design story modal: heading lines, then paragraphs separated by a blank row
const STORY_HEADING: [&str; 3] = ["THE DESIGN STORY", "Not just a robot.", "A roommate."];
const STORY_PARAGRAPHS: [&str; 4] = [
    "Inspired by Ceramics. We looked at the objects you leave out on your coffee table, not the tools you hide in your garage.",
    "A single, breathing light ring communicates status through subtle pulsations.",
    "\"Technology should be quiet.\" - Lead Designer, Sarah Jenkins",
    "Custom silicone dampeners turn the high-pitched whine into a low, white-noise hum.",
];

/// Screen renderer
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render whatever the site currently shows
    pub fn render_site(&mut self, site: &Site) {
        match site.view() {
            View::Loading => self.render_loading(site.loader()),
            View::Preorder => self.render_preorder(),
            View::Landing if site.is_story_open() => self.render_story(),
            View::Landing if site.is_menu_open() => self.render_menu(),
            View::Landing => {
                self.screen.clear();
                self.screen.set_line(0, "[Z] ZBot                    Pre-order  [=]");

                let mut row = 2;
                row = self.draw_demo(row, site.demo());
                row = self.draw_carousel(row + 1, site.carousel());
                row = self.draw_schedule(row + 1, site.schedule());

                if site.is_tour_visible() {
                    self.draw_tour(row + 1, site.tour());
                }
            }
        }
    }

    /// Render the loading screen
    pub fn render_loading(&mut self, loader: &LoadingScreen) {
        self.screen.clear();
        self.screen.set_line(8, "                      Z");
        self.screen.set_line(10, "                    ZBot");

        let bar = progress_bar(loader.progress());
        self.screen
            .write_line(12, format_args!("          {} {}%", bar, loader.progress()));
    }

    /// Render the mobile menu overlay
    pub fn render_menu(&mut self) {
        self.screen.clear();
        self.screen.set_line(0, "[Z] ZBot                                   [x]");
        for (i, section) in Section::ALL.iter().enumerate() {
            self.screen
                .write_line(4 + 2 * i, format_args!("{:^1$}", section.label(), SCREEN_COLS));
        }
        self.screen.set_line(10, "              Pre-order ZBot");
        self.screen.set_highlight(10, 14, 28);
    }

    /// Render the design story modal
    pub fn render_story(&mut self) {
        self.screen.clear();
        self.screen.set_line(0, "                                           [x]");
        let mut row = 2;
        for line in STORY_HEADING {
            self.screen.set_line(row, line);
            row += 1;
        }
        self.screen.set_highlight(2, 0, STORY_HEADING[0].len() as u8);

        for paragraph in STORY_PARAGRAPHS {
            row += 1;
            let mut rest = paragraph;
            while !rest.is_empty() && row < self.screen.rows() {
                let (line, tail) = wrap(rest, SCREEN_COLS);
                self.screen.set_line(row, line);
                rest = tail;
                row += 1;
            }
        }
    }

    /// Render the pre-order page
    pub fn render_preorder(&mut self) {
        self.screen.clear();
        self.screen.set_line(0, "< Back to Home");
        self.screen.set_line(2, "PRE-ORDER RESERVATION");
        self.screen.set_line(3, "Secure your ZBot.");
        self.screen.set_line(5, "No payment required today. We will notify");
        self.screen.set_line(6, "you when your unit is ready to ship.");
        self.screen.set_line(8, "First Name  ________   Last Name  ________");
        self.screen.set_line(9, "Email Address  ____________________");
        self.screen.set_line(10, "Shipping Region  [United States]");
        self.screen.set_line(12, "          [ Reserve for $0 ]");
        self.screen.set_highlight(12, 10, 28);
        self.screen.set_line(14, "The Future of Clean.");
        self.screen
            .set_line(15, "Limited First Edition batch shipping Nov 2024.");
    }

    /// Render only the mapping demo
    pub fn render_demo(&mut self, demo: &DemoSequencer) {
        self.screen.clear();
        self.draw_demo(0, demo);
    }

    /// Render only the stage carousel
    pub fn render_carousel(&mut self, carousel: &CycleCarousel) {
        self.screen.clear();
        self.draw_carousel(0, carousel);
    }

    /// Mapping demo: button, status lights and grid. Returns the next free row.
    fn draw_demo(&mut self, row: usize, demo: &DemoSequencer) -> usize {
        let bar = progress_bar(demo.progress());
        self.screen
            .write_line(row, format_args!("[{:<12}] {}", demo.phase().label(), bar));
        if demo.phase().is_running() {
            self.screen.set_highlight(row, 0, 14);
        }

        let lights = status_lights(demo);
        self.screen.set_line(row + 1, &lights);

        let grid = demo.grid();
        let robot = demo.robot_cell();
        let mut row = row + 2;

        for r in 0..grid.rows() {
            let mut line: String<LINE_LEN> = String::new();
            for c in 0..grid.cols() {
                let glyph = if robot == Some((c, r)) {
                    "R "
                } else {
                    match grid.unit_at(c, r).map(|u| demo.unit_state(u)) {
                        Some(UnitState::Unmapped) | None => ". ",
                        Some(UnitState::Mapped) => "o ",
                        Some(UnitState::Cleaned) => "* ",
                        Some(UnitState::Wall) => "##",
                    }
                };
                if line.push_str(glyph).is_err() {
                    break;
                }
            }
            self.screen.set_line(row, &line);
            row += 1;
        }

        self.screen.write_line(
            row,
            format_args!(
                "Cleaned {}/{} units",
                demo.completed_units().len(),
                grid.cleanable_count()
            ),
        );
        row + 1
    }

    /// Stage carousel: labels with the active one highlighted, then its
    /// description. Returns the next free row.
    fn draw_carousel(&mut self, row: usize, carousel: &CycleCarousel) -> usize {
        let mut line: String<LINE_LEN> = String::new();
        let mut active_span = None;

        for (i, stage) in CLEANING_STAGES
            .iter()
            .take(carousel.stage_count() as usize)
            .enumerate()
        {
            if i > 0 {
                let _ = line.push_str(" > ");
            }
            let status = carousel.stage_status(i as u8);
            if status == StageStatus::Past {
                let _ = line.push('+');
            }
            let start = line.len();
            let _ = line.push_str(stage.label);
            if status == StageStatus::Active {
                active_span = Some((start, line.len()));
            }
        }

        self.screen.set_line(row, &line);
        if let Some((start, end)) = active_span {
            if end <= SCREEN_COLS {
                self.screen.set_highlight(row, start as u8, end as u8);
            }
        }

        let active = carousel.active_index() as usize;
        if let Some(stage) = CLEANING_STAGES.get(active) {
            self.screen.write_line(
                row + 1,
                format_args!(
                    "{}: {} ({}%)",
                    stage.label,
                    stage.description,
                    carousel.progress_percent()
                ),
            );
        }
        row + 2
    }

    /// Schedule editor. Returns the next free row.
    fn draw_schedule(&mut self, row: usize, schedule: &ScheduleEditor) -> usize {
        let mut days: String<LINE_LEN> = String::new();
        for day in Weekday::ALL {
            let _ = if schedule.days().contains(day) {
                write!(days, "[{}]", day.label())
            } else {
                write!(days, " {} ", day.label())
            };
        }
        self.screen.set_line(row, &days);

        let start = schedule.start_time();
        self.screen.write_line(
            row + 1,
            format_args!("Start {} {}   [ {} ]", start, start.meridiem(), schedule.button_label()),
        );
        if schedule.is_saved() {
            self.screen.set_highlight(row + 1, 17, 37);
        }
        row + 2
    }

    /// Tour card. Returns the next free row.
    fn draw_tour(&mut self, row: usize, tour: &ProductTour) -> usize {
        let step = tour.current();
        self.screen.write_line(
            row,
            format_args!("Tour {}/{}: {}", tour.step() + 1, TOUR_STEPS.len(), step.title),
        );
        self.screen.set_highlight(row, 0, 4);
        let (first, second) = wrap(step.description, SCREEN_COLS);
        self.screen.set_line(row + 1, first);
        self.screen.set_line(row + 2, second);
        self.screen
            .write_line(row + 3, format_args!("[x]          [ {} ]", tour.button_label()));
        row + 4
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `[#####---------------]` for 0..=100
fn progress_bar(percent: u8) -> String<{ BAR_WIDTH + 2 }> {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    let mut bar = String::new();
    let _ = bar.push('[');
    for i in 0..BAR_WIDTH {
        let _ = bar.push(if i < filled { '#' } else { '-' });
    }
    let _ = bar.push(']');
    bar
}

/// Split off the longest run of whole words that fits in `width` columns
///
/// A single word longer than `width` is cut mid-word.
fn wrap(text: &str, width: usize) -> (&str, &str) {
    let Some((limit, _)) = text.char_indices().nth(width) else {
        return (text, "");
    };
    let head = &text[..limit];
    if text[limit..].starts_with(' ') {
        return (head, text[limit..].trim_start());
    }
    match head.rfind(' ') {
        Some(space) => (&text[..space], text[space..].trim_start()),
        None => (head, &text[limit..]),
    }
}

/// Mapping / cleaning / done indicator row
fn status_lights(demo: &DemoSequencer) -> String<LINE_LEN> {
    let phase = demo.phase();
    let light = |on: bool| if on { "(*)" } else { "( )" };

    let mut line = String::new();
    let _ = line.push_str(light(phase == Phase::Scanning));
    let _ = line.push_str(" Mapping  ");
    let _ = line.push_str(light(phase == Phase::Cleaning));
    let _ = line.push_str(" Cleaning  ");
    let _ = line.push_str(light(demo.is_done()));
    let _ = line.push_str(" Done");
    line
}
