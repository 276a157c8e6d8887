//! Todo client
//!
//! Sends one request to a todo server and prints the raw reply.

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::config::DEFAULT_READ_BUFFER_BYTES;
use todo_server::protocol::{Command, Request};
use todo_server::services::{
    CreateCategoryRequest, CreateTaskRequest, CreateUserRequest, ListCategoriesRequest,
    ListTasksRequest, LoginRequest,
};

/// Send a single command to a todo server
#[derive(Parser, Debug)]
#[command(name = "todo-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server address, e.g. 127.0.0.1:9986
    addr: String,

    /// create-task, list-tasks, create-category, list-categories,
    /// create-user, login or list-users
    command: String,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    due_date: Option<String>,

    #[arg(long)]
    category_id: Option<i64>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    password: Option<String>,

    /// Acting user for create and list commands
    #[arg(long, default_value_t = 0)]
    user_id: i64,
}

impl Cli {
    /// Unknown commands are sent as-is; the server ignores them.
    fn build_request(&self) -> Request {
        let mut request = Request {
            command: self.command.clone(),
            user_id: self.user_id,
            ..Request::default()
        };

        let Ok(command) = self.command.parse::<Command>() else {
            return request;
        };

        match command {
            Command::CreateTask => {
                request.create_task_request = Some(CreateTaskRequest {
                    title: self.title.clone().unwrap_or_default(),
                    due_date: self.due_date.clone().unwrap_or_default(),
                    category_id: self.category_id.unwrap_or_default(),
                    authenticated_user_id: self.user_id,
                });
            }
            Command::ListTasks => {
                request.list_tasks_request = Some(ListTasksRequest {
                    user_id: self.user_id,
                });
            }
            Command::CreateCategory => {
                request.create_category_request = Some(CreateCategoryRequest {
                    title: self.title.clone().unwrap_or_default(),
                    color: self.color.clone().unwrap_or_default(),
                    authenticated_user_id: self.user_id,
                });
            }
            Command::ListCategories => {
                request.list_categories_request = Some(ListCategoriesRequest {
                    user_id: self.user_id,
                });
            }
            Command::CreateUser => {
                request.create_user_request = Some(CreateUserRequest {
                    name: self.name.clone().unwrap_or_default(),
                    email: self.email.clone().unwrap_or_default(),
                    password: self.password.clone().unwrap_or_default(),
                });
            }
            Command::Login => {
                request.login_request = Some(LoginRequest {
                    email: self.email.clone().unwrap_or_default(),
                    password: self.password.clone().unwrap_or_default(),
                });
            }
            Command::ListUsers => {}
        }

        request
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let request = cli.build_request();
    let payload = request.encode().context("can't marshal request")?;

    let mut connection = TcpStream::connect(&cli.addr)
        .await
        .with_context(|| format!("can't dial the server at {}", cli.addr))?;
    tracing::debug!("Local address: {}", connection.local_addr()?);

    connection
        .write_all(&payload)
        .await
        .context("can't write to connection")?;
    tracing::debug!("Wrote {} bytes", payload.len());

    let mut data = vec![0_u8; DEFAULT_READ_BUFFER_BYTES];
    let bytes_read = connection
        .read(&mut data)
        .await
        .context("can't read data from connection")?;

    println!(
        "server response: {}",
        String::from_utf8_lossy(&data[..bytes_read])
    );
    Ok(())
}
