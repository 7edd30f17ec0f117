use clap::Subcommand;
use studykit_core::store::Database;
use studykit_core::{Priority, TaskFilter, TaskList};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the head of the list
    Add {
        /// Task text
        text: String,
        /// Priority: low, medium, or high
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// List tasks
    List {
        /// Filter: all, completed, pending, or high
        #[arg(long, default_value = "all")]
        filter: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's completed flag
    Toggle {
        /// Task id
        id: String,
    },
    /// Remove a task
    Remove {
        /// Task id
        id: String,
    },
    /// Remove all completed tasks
    ClearCompleted,
    /// Remove every task
    ClearAll,
    /// Show task counts
    Stats,
}

fn parse_priority(value: &str) -> Result<Priority, Box<dyn std::error::Error>> {
    match value {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        other => Err(format!("unknown priority: {other}").into()),
    }
}

fn parse_filter(value: &str) -> Result<TaskFilter, Box<dyn std::error::Error>> {
    match value {
        "all" => Ok(TaskFilter::All),
        "completed" => Ok(TaskFilter::Completed),
        "pending" => Ok(TaskFilter::Pending),
        "high" | "high-priority" => Ok(TaskFilter::HighPriority),
        other => Err(format!("unknown filter: {other}").into()),
    }
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Database::open()?;
    let mut tasks = TaskList::load(store)?;

    match action {
        TaskAction::Add { text, priority } => {
            let priority = parse_priority(&priority)?;
            let task = tasks.add(&text, priority)?;
            println!("added {}", task.id);
        }
        TaskAction::List { filter, json } => {
            let filter = parse_filter(&filter)?;
            let view = tasks.filter(filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if view.is_empty() {
                println!("no tasks to display");
            } else {
                for task in view {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {:<6} {}  ({})", task.priority, task.text, task.id);
                }
            }
        }
        TaskAction::Toggle { id } => {
            let task = tasks.toggle_complete(&id)?;
            let state = if task.completed { "completed" } else { "pending" };
            println!("{} is now {state}", task.id);
        }
        TaskAction::Remove { id } => {
            let task = tasks.remove(&id)?;
            println!("removed {}", task.id);
        }
        TaskAction::ClearCompleted => {
            let removed = tasks.clear_completed()?;
            println!("cleared {removed} completed task(s)");
        }
        TaskAction::ClearAll => {
            let removed = tasks.clear_all()?;
            println!("cleared {removed} task(s)");
        }
        TaskAction::Stats => {
            let stats = tasks.stats();
            println!(
                "total: {}  completed: {}  remaining: {}",
                stats.total, stats.completed, stats.remaining
            );
        }
    }

    Ok(())
}
