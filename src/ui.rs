use colored::Colorize;
use parking_lot::Mutex;

// RGB tuple constants for use with the `colored` crate's `.truecolor()` method
pub mod rgb {
    pub const ELECTRIC_PURPLE: (u8, u8, u8) = (225, 53, 255);
    pub const NEON_CYAN: (u8, u8, u8) = (128, 255, 234);
    pub const ELECTRIC_YELLOW: (u8, u8, u8) = (241, 250, 140);
    pub const SUCCESS_GREEN: (u8, u8, u8) = (80, 250, 123);
    pub const ERROR_RED: (u8, u8, u8) = (255, 99, 99);
    pub const DIM_WHITE: (u8, u8, u8) = (180, 180, 190);
}

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    *QUIET_MODE.lock() = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

fn paint(message: &str, (r, g, b): (u8, u8, u8)) -> colored::ColoredString {
    message.truecolor(r, g, b)
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", paint(message, rgb::NEON_CYAN).bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", paint(message, rgb::ELECTRIC_YELLOW).bold());
    }
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", paint(message, rgb::SUCCESS_GREEN).bold());
    }
}

/// Errors are shown even in quiet mode
pub fn print_error(message: &str) {
    eprintln!("{}", paint(message, rgb::ERROR_RED).bold());
}

pub fn print_dim(message: &str) {
    if !is_quiet_mode() {
        println!("{}", paint(message, rgb::DIM_WHITE));
    }
}

/// Key/value line used by `llmport config --print`
pub fn print_setting(key: &str, value: &str) {
    println!(
        "{}: {}",
        paint(key, rgb::ELECTRIC_PURPLE).bold(),
        paint(value, rgb::NEON_CYAN)
    );
}

pub fn print_version(version: &str) {
    if !is_quiet_mode() {
        println!(
            "{} {}",
            paint("llmport", rgb::ELECTRIC_PURPLE).bold(),
            paint(&format!("v{version}"), rgb::DIM_WHITE)
        );
    }
}

/// Mask all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
