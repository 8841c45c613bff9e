//! Terminal front-end for the Progress Buddy API.
//!
//! Mirrors the resource model one-to-one: goal forms and list views
//! become subcommands over the typed API client.

use anyhow::Result;
use clap::{Parser, Subcommand};

use progress_buddy_backend::client::{
    ActivityPayload, ApiClient, LogPayload, NewGoalPayload,
};
use progress_buddy_backend::models::activity::Activity;
use progress_buddy_backend::models::log::LogWithActivity;

#[derive(Parser)]
#[command(name = "buddy", version, about = "Progress Buddy terminal client")]
struct Cli {
    /// Base URL of the API, including the /api prefix.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage SMART goals.
    #[command(subcommand)]
    Activities(ActivityCommand),
    /// Manage progress log entries.
    #[command(subcommand)]
    Logs(LogCommand),
    /// Send buddy notifications.
    #[command(subcommand)]
    Notify(NotifyCommand),
    /// Check that the API is up.
    Health,
}

#[derive(Subcommand)]
enum ActivityCommand {
    /// List every goal, newest first.
    List,
    /// Show one goal with its progress logs.
    Show { id: i64 },
    /// Create a goal from its SMART fields.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specific: String,
        #[arg(long)]
        measurable: String,
        #[arg(long)]
        timebound: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        achievable: Option<String>,
        #[arg(long)]
        relevant: Option<String>,
        #[arg(long)]
        buddy_email: Option<String>,
    },
    /// Replace a goal's fields.
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        specific: String,
        #[arg(long)]
        measurable: String,
        #[arg(long)]
        timebound: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        achievable: Option<String>,
        #[arg(long)]
        relevant: Option<String>,
        #[arg(long)]
        buddy_email: Option<String>,
        #[arg(long)]
        completed: bool,
    },
    /// Mark a goal as completed.
    Complete { id: i64 },
    /// Delete a goal and everything logged against it.
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum LogCommand {
    /// List log entries, optionally for one goal.
    List {
        #[arg(long)]
        activity: Option<i64>,
    },
    /// Show one log entry.
    Show { id: i64 },
    /// Log progress against a goal. Metrics may be free text or JSON.
    Add {
        activity_id: i64,
        text: String,
        #[arg(long)]
        metrics: Option<String>,
    },
    /// Rewrite a log entry's text and metrics.
    Update {
        id: i64,
        text: String,
        #[arg(long)]
        metrics: Option<String>,
    },
    /// Delete a log entry.
    Delete { id: i64 },
    /// Aggregate log statistics for a goal.
    Stats { activity_id: i64 },
}

#[derive(Subcommand)]
enum NotifyCommand {
    /// Tell the buddy about an achievement.
    Achievement {
        activity_id: i64,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Tell the buddy the goal is done.
    GoalCompleted { activity_id: i64 },
    /// Send the buddy the trailing week of progress.
    Weekly { activity_id: i64 },
    /// Tell someone a new goal was set (no stored activity needed).
    NewGoal {
        #[arg(long)]
        email: String,
        #[arg(long)]
        goal: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        measurable: Option<String>,
        #[arg(long)]
        timebound: Option<String>,
        #[arg(long)]
        relevant: Option<String>,
    },
}

fn render_activity(activity: &Activity) {
    let check = if activity.completed { "x" } else { " " };
    println!("[{}] #{} {} (due {})", check, activity.id, activity.name, activity.timebound);
}

fn render_log(log: &LogWithActivity) {
    print!("#{} [{}] {}", log.id, log.activity_name, log.text);
    if let Some(metrics) = &log.metrics {
        print!(" — {}", metrics);
    }
    println!(" ({})", log.created_at.format("%Y-%m-%d %H:%M"));
}

/// CLI metrics are JSON when they parse as JSON, free text otherwise.
fn parse_metrics(raw: Option<String>) -> Option<serde_json::Value> {
    raw.map(|text| {
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let base_url = cli
        .api_url
        .or_else(|| std::env::var("API_URL").ok())
        .unwrap_or_else(|| "http://localhost:3001/api".to_string());
    let client = ApiClient::new(&base_url);

    match cli.command {
        Commands::Activities(command) => run_activities(&client, command).await?,
        Commands::Logs(command) => run_logs(&client, command).await?,
        Commands::Notify(command) => run_notify(&client, command).await?,
        Commands::Health => {
            let health = client.health().await?;
            println!("{}: {}", health.status, health.message);
        }
    }

    Ok(())
}

async fn run_activities(client: &ApiClient, command: ActivityCommand) -> Result<()> {
    match command {
        ActivityCommand::List => {
            let activities = client.list_activities().await?;
            if activities.is_empty() {
                println!("No goals yet.");
            }
            for activity in &activities {
                render_activity(activity);
            }
        }
        ActivityCommand::Show { id } => {
            let detail = client.get_activity(id).await?;
            render_activity(&detail.activity);
            println!("  specific:   {}", detail.activity.specific);
            println!("  measurable: {}", detail.activity.measurable);
            if let Some(achievable) = &detail.activity.achievable {
                println!("  achievable: {}", achievable);
            }
            if let Some(relevant) = &detail.activity.relevant {
                println!("  relevant:   {}", relevant);
            }
            if let Some(buddy_email) = &detail.activity.buddy_email {
                println!("  buddy:      {}", buddy_email);
            }
            println!("  {} log(s):", detail.logs.len());
            for log in &detail.logs {
                println!("    - {} ({})", log.text, log.created_at.format("%Y-%m-%d %H:%M"));
            }
        }
        ActivityCommand::Create {
            name,
            specific,
            measurable,
            timebound,
            description,
            achievable,
            relevant,
            buddy_email,
        } => {
            let created = client
                .create_activity(&ActivityPayload {
                    name: Some(name),
                    specific: Some(specific),
                    measurable: Some(measurable),
                    timebound: Some(timebound),
                    description,
                    achievable,
                    relevant,
                    buddy_email,
                    completed: None,
                })
                .await?;
            println!("Created goal #{}", created.id);
        }
        ActivityCommand::Update {
            id,
            name,
            specific,
            measurable,
            timebound,
            description,
            achievable,
            relevant,
            buddy_email,
            completed,
        } => {
            let updated = client
                .update_activity(
                    id,
                    &ActivityPayload {
                        name: Some(name),
                        specific: Some(specific),
                        measurable: Some(measurable),
                        timebound: Some(timebound),
                        description,
                        achievable,
                        relevant,
                        buddy_email,
                        completed: Some(completed),
                    },
                )
                .await?;
            println!("Updated goal #{}", updated.id);
        }
        ActivityCommand::Complete { id } => {
            let activity = client.complete_activity(id).await?;
            println!("Goal #{} marked completed: {}", activity.id, activity.name);
        }
        ActivityCommand::Delete { id } => {
            let result = client.delete_activity(id).await?;
            println!("{}", result.message);
        }
    }
    Ok(())
}

async fn run_logs(client: &ApiClient, command: LogCommand) -> Result<()> {
    match command {
        LogCommand::List { activity } => {
            let logs = client.list_logs(activity).await?;
            if logs.is_empty() {
                println!("No log entries.");
            }
            for log in &logs {
                render_log(log);
            }
        }
        LogCommand::Show { id } => {
            let log = client.get_log(id).await?;
            render_log(&log);
        }
        LogCommand::Add {
            activity_id,
            text,
            metrics,
        } => {
            let created = client
                .create_log(&LogPayload {
                    activity_id: Some(activity_id),
                    text: Some(text),
                    metrics: parse_metrics(metrics),
                })
                .await?;
            println!("Logged entry #{} against {}", created.id, created.activity_name);
        }
        LogCommand::Update { id, text, metrics } => {
            let updated = client
                .update_log(
                    id,
                    &LogPayload {
                        activity_id: None,
                        text: Some(text),
                        metrics: parse_metrics(metrics),
                    },
                )
                .await?;
            println!("Updated entry #{}", updated.id);
        }
        LogCommand::Delete { id } => {
            let result = client.delete_log(id).await?;
            println!("{}", result.message);
        }
        LogCommand::Stats { activity_id } => {
            let stats = client.log_stats(activity_id).await?;
            println!("{}", stats.activity_name);
            println!("  total logs:  {}", stats.stats.total_logs);
            println!("  days logged: {}", stats.stats.days_logged);
            println!(
                "  first / last: {} / {}",
                stats.stats.first_log_date.as_deref().unwrap_or("-"),
                stats.stats.last_log_date.as_deref().unwrap_or("-"),
            );
            for log in &stats.recent_logs {
                println!("    - {} ({})", log.text, log.created_at.format("%Y-%m-%d %H:%M"));
            }
        }
    }
    Ok(())
}

async fn run_notify(client: &ApiClient, command: NotifyCommand) -> Result<()> {
    match command {
        NotifyCommand::Achievement {
            activity_id,
            message,
        } => {
            client.send_achievement(activity_id, &message).await?;
            println!("Achievement notification sent.");
        }
        NotifyCommand::GoalCompleted { activity_id } => {
            client.send_goal_completed(activity_id).await?;
            println!("Goal-completed notification sent.");
        }
        NotifyCommand::Weekly { activity_id } => {
            client.send_weekly_summary(activity_id).await?;
            println!("Weekly summary sent.");
        }
        NotifyCommand::NewGoal {
            email,
            goal,
            description,
            measurable,
            timebound,
            relevant,
        } => {
            client
                .send_new_goal(&NewGoalPayload {
                    email: Some(email),
                    goal: Some(goal),
                    description,
                    measurable,
                    timebound,
                    relevant,
                })
                .await?;
            println!("New-goal notification sent.");
        }
    }
    Ok(())
}
