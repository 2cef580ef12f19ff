use std::io::Write as _;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use peoples_agent_core::{
    relative_time, AgentApi, ChatMessage, ClientError, ConversationManager, CredentialStore,
    HttpApiClient, Navigator, Role, Route, RouteDecision, SessionStore, Settings,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::commands::{handle_command, CommandResult};

/// Navigation signals land here; the view loop drains the slot between
/// renders, which is the only place a redirect takes effect.
#[derive(Default)]
pub struct PendingRoute(Mutex<Option<Route>>);

impl PendingRoute {
    pub fn take(&self) -> Option<Route> {
        self.0.lock().unwrap().take()
    }
}

impl Navigator for PendingRoute {
    fn navigate(&self, route: Route) {
        *self.0.lock().unwrap() = Some(route);
    }
}

type Input = Lines<BufReader<Stdin>>;

pub async fn run(settings: Settings) -> Result<()> {
    let api: Arc<dyn AgentApi> = Arc::new(HttpApiClient::from_settings(&settings));
    let navigator = Arc::new(PendingRoute::default());
    let mut session = SessionStore::new(
        api.clone(),
        credential_store(&settings),
        navigator.clone(),
    );
    session.restore().await;

    let mut manager = ConversationManager::new(api.clone(), navigator.clone());
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut current = Route::Chat;

    loop {
        if let Some(route) = navigator.take() {
            current = route;
        }
        match session.route_decision(current) {
            RouteDecision::Redirect(route) => {
                current = route;
                continue;
            }
            // restore() resolved before the loop, so Wait cannot occur here.
            RouteDecision::Wait | RouteDecision::Render => {}
        }
        let keep_going = match current {
            Route::SignIn => sign_in_view(&mut session, &mut input).await?,
            Route::Chat => {
                chat_view(&mut session, &mut manager, &api, &navigator, &mut input).await?
            }
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// One-shot mode: ask a single question and print the answer.
pub async fn run_single_query(settings: &Settings, query: &str) -> Result<()> {
    let api: Arc<dyn AgentApi> = Arc::new(HttpApiClient::from_settings(settings));
    let navigator = Arc::new(PendingRoute::default());
    let mut session = SessionStore::new(api.clone(), credential_store(settings), navigator.clone());
    session.restore().await;

    if !session.is_authenticated() {
        anyhow::bail!("not signed in - run `peoples-agent` and use the sign-in view first");
    }

    let mut manager = ConversationManager::new(api, navigator.clone());
    manager.send(&session, query).await;
    if navigator.take() == Some(Route::SignIn) {
        anyhow::bail!("session expired - sign in again");
    }
    if let Some(message) = manager.transcript().last() {
        print_message(message);
    }
    Ok(())
}

fn credential_store(settings: &Settings) -> CredentialStore {
    match &settings.storage.credentials_path {
        Some(path) => CredentialStore::with_path(path),
        None => CredentialStore::new(),
    }
}

async fn sign_in_view(session: &mut SessionStore, input: &mut Input) -> Result<bool> {
    println!();
    println!("The People's Agent - sign in");
    println!("Commands: login, signup, quit");

    loop {
        let Some(choice) = prompt(input, "sign-in> ").await? else {
            return Ok(false);
        };
        match choice.trim() {
            "" => continue,
            "quit" | "exit" | "q" => return Ok(false),
            "login" => {
                let Some(email) = prompt(input, "email: ").await? else {
                    return Ok(false);
                };
                let Some(password) = prompt(input, "password: ").await? else {
                    return Ok(false);
                };
                match session.login(email.trim(), &password).await {
                    Ok(()) => return Ok(true),
                    Err(err) => print_auth_error(err),
                }
            }
            "signup" => {
                let Some(email) = prompt(input, "email: ").await? else {
                    return Ok(false);
                };
                let Some(username) = prompt(input, "username: ").await? else {
                    return Ok(false);
                };
                let Some(password) = prompt(input, "password: ").await? else {
                    return Ok(false);
                };
                match session.signup(email.trim(), username.trim(), &password).await {
                    Ok(()) => return Ok(true),
                    Err(err) => print_auth_error(err),
                }
            }
            other => println!("Unknown choice: {other}"),
        }
    }
}

async fn chat_view(
    session: &mut SessionStore,
    manager: &mut ConversationManager,
    api: &Arc<dyn AgentApi>,
    navigator: &Arc<PendingRoute>,
    input: &mut Input,
) -> Result<bool> {
    manager.load_history(session).await;
    println!();
    for message in manager.transcript() {
        print_message(message);
    }

    loop {
        let Some(line) = prompt(input, "you> ").await? else {
            return Ok(false);
        };
        match handle_command(&line) {
            CommandResult::NotACommand => {
                let before = manager.transcript().len();
                manager.send(session, &line).await;
                // A rejected token redirects; let the guard loop take over.
                if peek(navigator) {
                    println!("Your session has expired. Please sign in again.");
                    return Ok(true);
                }
                for message in &manager.transcript()[before.min(manager.transcript().len())..] {
                    if message.role == Role::Assistant {
                        print_message(message);
                    }
                }
            }
            CommandResult::Message(text) => println!("{text}"),
            CommandResult::Quit => return Ok(false),
            CommandResult::Logout => {
                session.logout();
                return Ok(true);
            }
            CommandResult::ShowHistory => {
                manager.load_history(session).await;
                if manager.history().is_empty() {
                    println!("No saved history yet.");
                }
                for (i, message) in manager.history().iter().enumerate() {
                    print!("[{i}] ");
                    print_message(message);
                }
            }
            CommandResult::Window { anchor, radius } => {
                manager.window_history(anchor, radius);
                for message in manager.transcript() {
                    print_message(message);
                }
            }
            CommandResult::ClearHistory => {
                manager.clear_history(session).await;
                println!("History cleared.");
            }
            CommandResult::ShowUpdates => show_updates(api).await,
            CommandResult::ShowStatus => match session.user() {
                Some(user) => println!("Signed in as {} <{}>", user.username, user.email),
                None => println!("Not signed in."),
            },
        }
    }
}

async fn show_updates(api: &Arc<dyn AgentApi>) {
    // Degrades to an empty feed, like the service itself.
    let updates = api.updates().await.unwrap_or_default();
    if updates.is_empty() {
        println!("No recent document updates.");
        return;
    }
    println!("Recently indexed documents:");
    for update in updates {
        println!("  {} ({})", update.title, update.date);
        println!("    {}", update.url);
    }
}

fn print_message(message: &ChatMessage) {
    let age = relative_time(message.timestamp, Utc::now());
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "agent",
    };
    println!("[{age}] {who}: {}", message.content);
    for source in &message.sources {
        println!("        source: {source}");
    }
}

fn print_auth_error(err: ClientError) {
    match &err {
        ClientError::Authentication(detail) => println!("{detail}"),
        ClientError::Validation(_) => println!("{err}"),
        _ => println!("Sign-in failed: {err}"),
    }
}

fn peek(navigator: &Arc<PendingRoute>) -> bool {
    let pending = navigator.take();
    if let Some(route) = pending {
        // Put it back for the guard loop.
        navigator.navigate(route);
        true
    } else {
        false
    }
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
