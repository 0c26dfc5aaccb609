//! Analytics event shim.
//!
//! # Responsibility
//! - Give UI surfaces a fire-and-forget way to record open/close/click
//!   events with stable screen and item names.
//!
//! # Invariants
//! - Reporting never fails and never propagates errors to the caller; the
//!   shim only writes structured log lines the host app can forward.

use log::info;

/// Screen names reported with every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsScreen {
    Main,
    Statistics,
    Filters,
    Type,
    Card,
    Edit,
    Category,
    CategoryName,
    Schedule,
}

impl AnalyticsScreen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Statistics => "Statistics",
            Self::Filters => "Filters",
            Self::Type => "Type",
            Self::Card => "Card",
            Self::Edit => "Edit",
            Self::Category => "Category",
            Self::CategoryName => "CategoryName",
            Self::Schedule => "Schedule",
        }
    }
}

/// Tappable item names reported with click events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsItem {
    AddTrack,
    Track,
    Filter,
    Edit,
    Delete,
}

impl AnalyticsItem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddTrack => "add_track",
            Self::Track => "track",
            Self::Filter => "filter",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Fire-and-forget analytics reporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsService;

impl AnalyticsService {
    /// Reports a raw event. Never fails.
    pub fn report(&self, event: &str, screen: AnalyticsScreen, item: Option<AnalyticsItem>) {
        match item {
            Some(item) => info!(
                "event=analytics module=analytics name={event} screen={} item={}",
                screen.as_str(),
                item.as_str()
            ),
            None => info!(
                "event=analytics module=analytics name={event} screen={}",
                screen.as_str()
            ),
        }
    }

    /// Screen-appear event.
    pub fn screen_opened(&self, screen: AnalyticsScreen) {
        self.report("open", screen, None);
    }

    /// Screen-disappear event.
    pub fn screen_closed(&self, screen: AnalyticsScreen) {
        self.report("close", screen, None);
    }

    /// Tap event on a named item.
    pub fn tapped(&self, item: AnalyticsItem, screen: AnalyticsScreen) {
        self.report("click", screen, Some(item));
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsItem, AnalyticsScreen, AnalyticsService};

    #[test]
    fn reporting_never_fails_without_a_logger() {
        let analytics = AnalyticsService;
        analytics.screen_opened(AnalyticsScreen::Main);
        analytics.tapped(AnalyticsItem::AddTrack, AnalyticsScreen::Main);
        analytics.screen_closed(AnalyticsScreen::Main);
    }

    #[test]
    fn item_names_use_reporting_convention() {
        assert_eq!(AnalyticsItem::AddTrack.as_str(), "add_track");
        assert_eq!(AnalyticsItem::Delete.as_str(), "delete");
        assert_eq!(AnalyticsScreen::CategoryName.as_str(), "CategoryName");
    }
}
