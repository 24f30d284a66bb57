// System status display — DB stats for the `lectern status` command.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `lectern init` to set up the database.");
        return Ok(());
    }

    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let users = db.user_count().await?;
    let uploads = db.upload_count().await?;
    println!("Students: {} registered, {} stored uploads", users, uploads);

    let topics = db.topics_with_questions().await?;
    if topics.is_empty() {
        println!("Quizzes: none authored yet");
        println!("  Faculty can add questions at /faculty-dashboard");
    } else {
        let total: i64 = topics.iter().map(|(_, n)| n).sum();
        println!("Quizzes: {} questions across {} topics:", total, topics.len());
        for (topic, count) in topics.iter().take(10) {
            println!("  {} ({} questions)", topic, count);
        }
        if topics.len() > 10 {
            println!("  ... and {} more topics", topics.len() - 10);
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_sensible_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
