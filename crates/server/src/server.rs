//! TCP front end
//!
//! Each accepted connection is handled on its own task: one read of up to
//! `read_buffer_bytes`, one dispatch, at most one reply, then close.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use anyhow::Context;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::protocol::{Command, Request};
use crate::services::{ListCategoriesRequest, ListTasksRequest, ListUsersRequest, ServiceResult};
use crate::state::AppState;

pub struct Server {
    listener: TcpListener,
    state: AppState,
    read_buffer_bytes: usize,
}

impl Server {
    pub async fn bind(addr: &str, state: AppState, read_buffer_bytes: usize) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            state,
            read_buffer_bytes,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Connections already being handled are left to finish on their own.
    pub async fn serve<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received, stopping listener");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let state = self.state.clone();
                        let read_buffer_bytes = self.read_buffer_bytes;
                        tokio::spawn(async move {
                            if let Err(err) = handle_connection(stream, peer, state, read_buffer_bytes).await {
                                warn!("Connection from {} failed: {:#}", peer, err);
                            }
                        });
                    }
                    Err(err) => warn!("Can't accept new connection: {}", err),
                },
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    state: AppState,
    read_buffer_bytes: usize,
) -> anyhow::Result<()> {
    let mut raw_request = vec![0_u8; read_buffer_bytes];
    let bytes_read = stream
        .read(&mut raw_request)
        .await
        .context("can't read data from connection")?;
    debug!("Client {} sent {} bytes", peer, bytes_read);

    let request = match Request::decode(&raw_request[..bytes_read]) {
        Ok(request) => request,
        Err(err) => {
            warn!("Bad request from {}: {}", peer, err);
            return Ok(());
        }
    };

    if let Some(reply) = dispatch(&state, request).await {
        stream
            .write_all(&reply)
            .await
            .context("can't write data to connection")?;
    }

    if let Err(err) = stream.shutdown().await {
        debug!("Closing connection to {}: {}", peer, err);
    }
    Ok(())
}

/// Run one request against the services and render the reply.
///
/// Returns `None` for commands the server does not know.
pub async fn dispatch(state: &AppState, request: Request) -> Option<Vec<u8>> {
    let command = match request.command.parse::<Command>() {
        Ok(command) => command,
        Err(err) => {
            warn!("Ignoring request: {}", err);
            return None;
        }
    };
    let user_id = request.user_id;
    debug!("Dispatching {} for user {}", command, user_id);

    let reply = match command {
        Command::CreateTask => {
            let mut req = request.create_task_request.unwrap_or_default();
            req.authenticated_user_id = user_id;
            render(state.tasks().create(req).await)
        }
        Command::ListTasks => {
            let req = request
                .list_tasks_request
                .unwrap_or(ListTasksRequest { user_id });
            render(state.tasks().list(req).await)
        }
        Command::CreateCategory => {
            let mut req = request.create_category_request.unwrap_or_default();
            req.authenticated_user_id = user_id;
            render(state.categories().create(req).await)
        }
        Command::ListCategories => {
            let req = request
                .list_categories_request
                .unwrap_or(ListCategoriesRequest { user_id });
            render(state.categories().list(req).await)
        }
        Command::CreateUser => {
            let req = request.create_user_request.unwrap_or_default();
            render(state.users().create(req).await)
        }
        Command::Login => {
            let req = request.login_request.unwrap_or_default();
            render(state.users().login(req).await)
        }
        Command::ListUsers => render(state.users().list(ListUsersRequest::default()).await),
    };

    Some(reply)
}

fn render<T: Serialize>(result: ServiceResult<T>) -> Vec<u8> {
    match result {
        Ok(response) => match serde_json::to_vec(&response) {
            Ok(data) => data,
            Err(err) => {
                warn!("Can't marshal response: {}", err);
                err.to_string().into_bytes()
            }
        },
        Err(err) => {
            debug!("Request failed: {}", err);
            err.to_string().into_bytes()
        }
    }
}
