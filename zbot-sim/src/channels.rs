//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use zbot_display::Screen;

use crate::tasks::input::Command;

/// Channel capacity for user commands
const INPUT_CHANNEL_SIZE: usize = 8;

/// Commands from stdin or a script
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, Command, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Last rendered screen
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Signal that `SCREEN_BUFFER` holds a new frame
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
