use penugasan_decoders::Assignment;

/// Backslash-escape the characters legacy Telegram Markdown treats as entity
/// delimiters. An unpaired one makes the whole message fail to parse.
pub fn escape_markdown(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Render an assignment as a Telegram Markdown message.
///
/// Every line is always present; missing values already carry their defaults.
/// Field values are escaped, the template's own `*label*` markup is not.
pub fn format_message(a: &Assignment) -> String {
    let e = escape_markdown;
    format!(
        "*PENUGASAN*\n\n\
         🗓 *Tanggal Penugasan:* {}\n\
         🏗 *Nama Project:* {}\n\
         📦 *Work Package:* {}\n\
         📄 *Nama Activity:* {}\n\
         🆔 *ID Activity:* {}\n\
         👤 *Ditugaskan Kepada:* {}\n\
         📅 *Est. Start:* {}\n\
         ⏳ *Est. Duration:* {}\n\
         📆 *Est. End:* {}\n\
         💸 *Est. Cost:* {}\n\
         👤 *User:* {}\n\
         🔗 *Link Informasi Tugas:* {}\n\
         🔗 *Link Form Terima Tugas:* {}",
        e(&a.assign_date),
        e(&a.project_name),
        e(&a.work_package),
        e(&a.activity_name),
        e(&a.activity_id),
        e(&a.assignee_name),
        e(&a.est_start),
        e(&a.est_duration),
        e(&a.est_end),
        e(&a.est_cost),
        e(&a.user_name),
        e(&a.link_activities),
        e(&a.link_accepted),
    )
}
