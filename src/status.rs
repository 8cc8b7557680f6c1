//! Urgency classification by days remaining.
//!
//! Thresholds are inclusive upper bounds:
//!
//! | days     | status   |
//! |----------|----------|
//! | 0..=21   | Critical |
//! | 22..=30  | Upcoming |
//! | 31..=60  | Moderate |
//! | 61..     | Normal   |

use std::fmt;

pub const CRITICAL_MAX_DAYS: u32 = 21;
pub const UPCOMING_MAX_DAYS: u32 = 30;
pub const MODERATE_MAX_DAYS: u32 = 60;

/// Rows at or below this many days get the pulsing highlight.
pub const URGENT_MAX_DAYS: u32 = 15;

/// Urgency of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Critical,
    Upcoming,
    Moderate,
    Normal,
}

impl Status {
    /// Every status, most urgent first.
    pub const ALL: [Status; 4] = [
        Status::Critical,
        Status::Upcoming,
        Status::Moderate,
        Status::Normal,
    ];

    pub fn from_days(days_remaining: u32) -> Self {
        if days_remaining <= CRITICAL_MAX_DAYS {
            Status::Critical
        } else if days_remaining <= UPCOMING_MAX_DAYS {
            Status::Upcoming
        } else if days_remaining <= MODERATE_MAX_DAYS {
            Status::Moderate
        } else {
            Status::Normal
        }
    }

    /// Label used in the CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Critical => "Crítico",
            Status::Upcoming => "Próximo",
            Status::Moderate => "Moderado",
            Status::Normal => "Normal",
        }
    }

    /// Table badge text.
    pub fn badge(&self) -> &'static str {
        match self {
            Status::Critical => "🔴 CRÍTICO",
            Status::Upcoming => "🌸 PRÓXIMO",
            Status::Moderate => "🟨 MODERADO",
            Status::Normal => "🟩 NORMAL",
        }
    }

    /// Legend tile heading: same glyph as the badge, title-case label.
    pub fn legend_title(&self) -> &'static str {
        match self {
            Status::Critical => "🔴 Crítico",
            Status::Upcoming => "🌸 Próximo",
            Status::Moderate => "🟨 Moderado",
            Status::Normal => "🟩 Normal",
        }
    }

        /// Table row background.
    pub fn row_color(&self) -> &'static str {
        match self {
            Status::Critical => "#fee2e2",
            Status::Upcoming => "#fce7f3",
            Status::Moderate => "#fef3c7",
            Status::Normal => "#dcfce7",
        }
    }

    /// Short description of the range, for the legend under the table.
    pub fn legend(&self) -> &'static str {
        match self {
            Status::Critical => "≤ 3 semanas",
            Status::Upcoming => "1 mes",
            Status::Moderate => "2 meses",
            Status::Normal => "3+ meses",
        }
    }

    /// CSS class suffix for the badge and legend tile.
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::Upcoming => "upcoming",
            Status::Moderate => "moderate",
            Status::Normal => "normal",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn is_urgent(days_remaining: u32) -> bool {
    days_remaining <= URGENT_MAX_DAYS
}
