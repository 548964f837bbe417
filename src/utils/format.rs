/// Formato `MM:SS` del contador de inactividad
pub fn format_countdown(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
