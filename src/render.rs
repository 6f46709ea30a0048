//! Stateless terminal rendering of list views.
//!
//! Pure string building over controller state: no fetching, no mutation.
//! The CLI prints the result; tests assert on it directly.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::controller::{ListController, ListState};
use crate::models::{Attendee, CapacityStatus, Event, EventStatus};
use crate::pagination::PageWindow;

/// Render a full list view: loading line, failure panel, empty state, or the
/// items in server order followed by the pager.
pub fn render_list<T, R: Clone>(
    controller: &ListController<T, R>,
    item: impl Fn(&T) -> String,
) -> String {
    match controller.state() {
        ListState::Idle => String::new(),
        ListState::Loading => format!("Loading {}...", controller.label()),
        ListState::Failure(message) => {
            format!("Error: {message}\nPress 'r' to retry.")
        }
        ListState::Success(page) if page.is_empty() => {
            format!("No {} found.", controller.label())
        }
        ListState::Success(page) => {
            let mut out = String::new();
            for entry in &page.items {
                out.push_str(&item(entry));
                out.push('\n');
            }
            if let Some(window) = controller.window() {
                out.push_str(&render_pager(controller.params().page, window));
                out.push('\n');
            }
            out
        }
    }
}

/// Pager line: every page number for direct jumps, current page bracketed,
/// prev/next shown only when enabled.
pub fn render_pager(current: u64, window: &PageWindow) -> String {
    let mut out = String::new();
    out.push_str(if window.has_prev { "< prev  " } else { "        " });
    for page in window.page_numbers() {
        if page == current {
            let _ = write!(out, "[{page}] ");
        } else {
            let _ = write!(out, "{page} ");
        }
    }
    if window.has_next {
        out.push_str(" next >");
    }
    out.trim_end().to_string()
}

/// One-line event summary for the list view.
pub fn event_line(event: &Event) -> String {
    let status = match event.status_at(Utc::now()) {
        EventStatus::Upcoming => "upcoming",
        EventStatus::Ongoing => "ongoing",
        EventStatus::Ended => "ended",
    };
    let capacity = match event.capacity_status() {
        CapacityStatus::Available => "available",
        CapacityStatus::AlmostFull => "almost full",
        CapacityStatus::Full => "full",
    };
    format!(
        "#{} {} @ {} | {} {} | {} | {}/{} ({})",
        event.id,
        event.name,
        event.location,
        format_date(event.start_time),
        format_time(event.start_time),
        status,
        event.attendee_count,
        event.max_capacity,
        capacity,
    )
}

/// Multi-line event detail view.
pub fn event_details(event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Event #{}: {}", event.id, event.name);
    let _ = writeln!(out, "Location:  {}", event.location);
    let _ = writeln!(
        out,
        "Starts:    {} at {}",
        format_date(event.start_time),
        format_time(event.start_time)
    );
    let _ = writeln!(
        out,
        "Ends:      {} at {}",
        format_date(event.end_time),
        format_time(event.end_time)
    );
    let _ = write!(
        out,
        "Capacity:  {}/{}",
        event.attendee_count, event.max_capacity
    );
    out
}

/// One-line attendee summary for the attendee list view.
pub fn attendee_line(attendee: &Attendee) -> String {
    format!("#{} {} <{}>", attendee.id, attendee.name, attendee.email)
}

/// Long date form, e.g. "Tuesday, September 1, 2026".
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%A, %B %-d, %Y").to_string()
}

/// 12-hour clock, e.g. "07:30 PM".
pub fn format_time(dt: DateTime<Utc>) -> String {
    dt.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::controller::ListController;
    use crate::error::ClientError;
    use crate::models::Page;

    fn page(items: Vec<i64>, total: u64, offset: u64) -> Page<i64> {
        let has_next = offset + (items.len() as u64) < total;
        Page {
            items,
            total,
            offset,
            limit: 10,
            has_next,
            has_prev: offset > 0,
        }
    }

    #[test]
    fn loading_state_renders_label() {
        let mut ctl: ListController<i64, ()> = ListController::new((), 10, "events");
        ctl.start();
        assert_eq!(render_list(&ctl, |n| n.to_string()), "Loading events...");
    }

    #[test]
    fn failure_state_renders_message_and_retry_hint() {
        let mut ctl: ListController<i64, ()> = ListController::new((), 10, "events");
        let ticket = ctl.start();
        ctl.settle(ticket, Err(ClientError::network()));
        let rendered = render_list(&ctl, |n| n.to_string());
        assert!(rendered.contains("Network error: unable to reach the server"));
        assert!(rendered.contains("retry"));
    }

    #[test]
    fn empty_page_renders_empty_state() {
        let mut ctl: ListController<i64, ()> = ListController::new((), 10, "attendees");
        let ticket = ctl.start();
        ctl.settle(ticket, Ok(page(vec![], 0, 0)));
        assert_eq!(render_list(&ctl, |n| n.to_string()), "No attendees found.");
    }

    #[test]
    fn items_render_in_server_order_with_pager() {
        let mut ctl: ListController<i64, ()> = ListController::new((), 10, "events").starting_at(2);
        let ticket = ctl.start();
        ctl.settle(ticket, Ok(page(vec![13, 11, 12], 25, 10)));
        let rendered = render_list(&ctl, |n| n.to_string());
        assert_eq!(rendered, "13\n11\n12\n< prev  1 [2] 3  next >\n");
    }

    #[test]
    fn pager_disables_prev_on_first_page() {
        let window = PageWindow::compute(25, 10, 1);
        let pager = render_pager(1, &window);
        assert!(!pager.contains("prev"));
        assert!(pager.contains("[1] 2 3"));
        assert!(pager.ends_with("next >"));
    }

    #[test]
    fn pager_disables_next_on_last_page() {
        let window = PageWindow::compute(25, 10, 3);
        let pager = render_pager(3, &window);
        assert!(pager.starts_with("< prev"));
        assert!(!pager.contains("next"));
        assert!(pager.contains("[3]"));
    }

    #[test]
    fn date_and_time_formats_match_the_ui() {
        let dt = Utc.with_ymd_and_hms(2026, 9, 1, 19, 30, 0).unwrap();
        assert_eq!(format_date(dt), "Tuesday, September 1, 2026");
        assert_eq!(format_time(dt), "07:30 PM");
    }
}
