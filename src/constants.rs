//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Autoplay timing constants.
pub mod playback {
    /// Scheduler period in milliseconds.
    pub const TICK_PERIOD_MS: u64 = 50;

    /// Progress value at which a slide is complete.
    pub const FULL_PROGRESS: f64 = 100.0;

    /// Dwell time given to newly created slides, in seconds.
    pub const DEFAULT_DURATION_SECS: u32 = 6;

    /// Lower bound offered by the duration control (UI policy only).
    pub const MIN_UI_DURATION_SECS: u32 = 3;

    /// Upper bound offered by the duration control (UI policy only).
    pub const MAX_UI_DURATION_SECS: u32 = 15;
}

/// Element enter/exit transition constants.
pub mod animation {
    /// Length of every enter/exit transition in milliseconds.
    pub const TRANSITION_MS: u64 = 600;

    /// Cubic-bezier control points `(x1, y1, x2, y2)` of the shared ease-out curve.
    pub const EASE_OUT: (f64, f64, f64, f64) = (0.22, 1.0, 0.36, 1.0);

    /// Horizontal offset a sliding element starts from.
    pub const SLIDE_OFFSET: f64 = 50.0;

    /// Scale an element grows from (`scaleUp`) or shrinks to (`scaleDown`).
    pub const SCALED_DOWN: f64 = 0.8;
}

/// Edit session constants.
pub mod edit {
    /// Watermark of a fresh deck; starter elements sit below it.
    pub const INITIAL_Z_WATERMARK: i64 = 20;

    /// Offset applied to both axes of a duplicated element.
    pub const DUPLICATE_OFFSET: f64 = 20.0;

    /// Position of newly added elements.
    pub const NEW_ELEMENT_POSITION: (f64, f64) = (100.0, 100.0);

    /// Size of newly added `text` elements.
    pub const NEW_TEXT_SIZE: (f64, f64) = (400.0, 100.0);

    /// Size of every other newly added element.
    pub const NEW_ELEMENT_SIZE: (f64, f64) = (200.0, 200.0);

    /// Step used by keyboard nudges in the terminal editor.
    pub const NUDGE_STEP: f64 = 10.0;
}

/// Canvas geometry constants.
pub mod canvas {
    /// Canvas width used when a slide does not set one.
    pub const DEFAULT_WIDTH: u32 = 1080;

    /// Canvas height used when a slide does not set one.
    pub const DEFAULT_HEIGHT: u32 = 1920;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}

/// Assistant collaborator constants.
pub mod assistant {
    /// Model used when none is configured.
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

    /// Request timeout in seconds.
    pub const TIMEOUT_SECS: u64 = 30;

    /// Reply recorded when the assistant answers with nothing.
    pub const EMPTY_REPLY: &str = "I'm not sure how to help with that.";

    /// Reply recorded when the assistant call fails.
    pub const FAILURE_REPLY: &str = "Sorry, I encountered an error.";
}

/// Sharing constants.
pub mod share {
    /// Days a share link stays resolvable by default.
    pub const DEFAULT_RETENTION_DAYS: i64 = 28;

    /// Base URL share ids are appended to.
    pub const DEFAULT_BASE_URL: &str = "https://iswrapped.app/view";

    /// Storage key the editor saves the working deck under.
    pub const WORKING_DECK_KEY: &str = "wrapped_data";
}
