use penugasan_common::types::{NO_DATA, Record};

use crate::datetime::format_datetime;
use crate::extract::{date_start, extract_date, extract_formula, extract_number, extract_text};

/// Property names as they appear in the assignment database.
pub mod props {
    pub const ACTIVITY_ID: &str = "ID Activities";
    pub const ACTIVITY_NAME: &str = "Activities Name";
    pub const PROJECT_NAME: &str = "Project Name";
    pub const WORK_PACKAGE: &str = "Work Package Name";
    pub const ASSIGNEE_NAME: &str = "Assignee Name";
    /// The database column really has two spaces after the dot.
    pub const EST_START: &str = "Est.  Start";
    pub const EST_DURATION: &str = "Est. Duration";
    pub const EST_END: &str = "Est. End";
    pub const EST_COST: &str = "Est. Cost";
    pub const USER_NAME: &str = "User Name";
    pub const ASSIGN_DATE: &str = "Assign Date";
    pub const LINK_ACTIVITIES: &str = "Link Activities";
    pub const LINK_ACCEPTED: &str = "Link Accepted";
    pub const SEND_TASK_ID: &str = "ID Kirim Tugas";
    pub const TELEGRAM_ID: &str = "ID Telegram (As)";
}

/// Default for fields that render as a dash rather than the no-data text.
const DASH: &str = "-";

/// Every field of an assignment page, resolved to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub record_id: String,
    pub assign_date: String,
    pub project_name: String,
    pub work_package: String,
    pub activity_name: String,
    pub activity_id: String,
    pub assignee_name: String,
    pub est_start: String,
    pub est_duration: String,
    pub est_end: String,
    pub est_cost: String,
    pub user_name: String,
    pub link_activities: String,
    pub link_accepted: String,
    pub send_task_id: String,
    pub telegram_id: String,
}

impl Assignment {
    pub fn from_record(record: &Record) -> Self {
        let prop = |name: &str| record.property(name);

        Self {
            record_id: record.id.clone(),
            assign_date: format_datetime(date_start(prop(props::ASSIGN_DATE))),
            project_name: extract_text(prop(props::PROJECT_NAME), DASH),
            work_package: extract_text(prop(props::WORK_PACKAGE), NO_DATA),
            activity_name: extract_text(prop(props::ACTIVITY_NAME), NO_DATA),
            activity_id: extract_text(prop(props::ACTIVITY_ID), NO_DATA),
            assignee_name: extract_text(prop(props::ASSIGNEE_NAME), NO_DATA),
            est_start: extract_date(prop(props::EST_START)),
            est_duration: extract_number(prop(props::EST_DURATION), DASH),
            est_end: extract_date(prop(props::EST_END)),
            est_cost: extract_number(prop(props::EST_COST), DASH),
            user_name: extract_text(prop(props::USER_NAME), NO_DATA),
            link_activities: extract_formula(prop(props::LINK_ACTIVITIES)),
            link_accepted: extract_formula(prop(props::LINK_ACCEPTED)),
            send_task_id: extract_text(prop(props::SEND_TASK_ID), NO_DATA),
            telegram_id: extract_text(prop(props::TELEGRAM_ID), NO_DATA),
        }
    }

    /// True when both the send-task ID and the recipient's Telegram ID are present.
    ///
    /// Blank values count as missing; fragments without plain text extract to "".
    pub fn is_deliverable(&self) -> bool {
        is_present(&self.send_task_id) && is_present(&self.telegram_id)
    }
}

fn is_present(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != NO_DATA
}
