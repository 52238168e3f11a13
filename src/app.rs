//! Interactive console controller.
//!
//! A numbered menu dispatching to action handlers that compose the API
//! client, the credential generator, and the account store. No error
//! escapes a handler: failures are reported to the user and control returns
//! to the menu. The non-interactive cores ([`create_account_record`],
//! [`clamp_bulk_count`], [`watch_for_new_message`]) are split out from the
//! prompting code so they can be exercised against a stubbed API.

use crate::credentials::{generate_password, generate_username};
use crate::models::{MessageDetail, MessageSummary, StoredAccount};
use crate::store::{DEFAULT_STORE_FILE, Store};
use crate::{Client, Result};
use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::watch;

const USERNAME_LEN: usize = 10;
const PASSWORD_LEN: usize = 16;
const BULK_DEFAULT: usize = 3;
const BULK_MAX: usize = 20;
// The service tolerates roughly 8 requests per second.
const BULK_PAUSE: Duration = Duration::from_millis(300);
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const SUBJECT_WIDTH: usize = 50;
const INTRO_WIDTH: usize = 80;
const HTML_PREVIEW: usize = 500;

/// Build the default client and store and run the interactive console.
pub async fn run() -> Result<()> {
    let client = Client::new()?;
    let store = Store::new(DEFAULT_STORE_FILE);
    App::new(client, store).run().await
}

/// The interactive menu controller.
///
/// Holds the configured [`Client`] and [`Store`]; every menu iteration is
/// otherwise independent.
pub struct App {
    client: Client,
    store: Store,
}

impl App {
    pub fn new(client: Client, store: Store) -> Self {
        Self { client, store }
    }

    /// Startup connectivity check followed by the menu loop.
    ///
    /// When the service is unreachable (or offers no active domain) this
    /// prints guidance and returns without entering the menu.
    pub async fn run(&self) -> Result<()> {
        println!("Mail.tm disposable mailbox console");
        println!("Checking connection to Mail.tm...");

        let domains = match self.client.list_domains().await {
            Ok(domains) => domains,
            Err(err) => {
                error_msg(&format!("Failed to reach the Mail.tm API: {err}"));
                Vec::new()
            }
        };
        if domains.is_empty() {
            error_msg("Could not connect to the Mail.tm API.");
            info("Check your internet connection and try again later.");
            return Ok(());
        }
        success(&format!("Connected. Available domains: {}", domains.join(", ")));

        let accounts = self.store.load();
        if !accounts.is_empty() {
            info(&format!("Loaded {} saved account(s)", accounts.len()));
        }

        loop {
            print_menu();
            match read_line("  Select an action > ").as_str() {
                "1" => self.create_single().await,
                "2" => self.create_bulk().await,
                "3" => self.list_accounts(),
                "4" => self.check_inbox().await,
                "5" => self.wait_for_mail().await,
                "6" => self.delete_account().await,
                "7" => self.export_accounts(),
                "0" => {
                    println!("\nBye!");
                    return Ok(());
                }
                _ => error_msg("Invalid choice. Try again."),
            }
        }
    }

    /// Create one mailbox: pick a domain, pick or generate a username,
    /// create, persist, display the credentials.
    async fn create_single(&self) {
        println!();
        println!("Create a new mailbox");
        separator();

        let domains = match self.client.list_domains().await {
            Ok(domains) => domains,
            Err(err) => {
                error_msg(&format!("Failed to fetch domains: {err}"));
                return;
            }
        };
        if domains.is_empty() {
            error_msg("No domains available. Try again later.");
            return;
        }

        println!("\nAvailable domains:");
        for (i, domain) in domains.iter().enumerate() {
            println!("  {}. @{domain}", i + 1);
        }

        let domain = if domains.len() == 1 {
            &domains[0]
        } else {
            let input = read_line(&format!("\nChoose a domain (1-{}): ", domains.len()));
            // Anything unparseable or out of range falls back to the first.
            match select_index(&input, domains.len()) {
                Some(index) => &domains[index],
                None => &domains[0],
            }
        };

        println!("\nUsername:");
        println!("  1. Random");
        println!("  2. Enter your own");
        let username = if read_line("\n  Your choice (1/2): ") == "2" {
            let entered = read_line("  Username: ").to_lowercase();
            if entered.is_empty() {
                let username = generate_username(USERNAME_LEN);
                info(&format!("Empty name, using a random one: {username}"));
                username
            } else {
                entered
            }
        } else {
            generate_username(USERNAME_LEN)
        };

        println!("\nCreating account...");
        match create_account_record(&self.client, &self.store, domain, &username).await {
            Ok(record) => {
                println!();
                success("Account created!");
                separator();
                println!("  Email:    {}", record.address);
                println!("  Password: {}", record.password);
                println!("  ID:       {}", record.id);
                separator();
                info(&format!("Credentials saved to {}", self.store.path().display()));
            }
            Err(err) => error_msg(&format!("Failed to create the account: {err}")),
        }
    }

    /// Create several mailboxes on the first active domain, pausing between
    /// requests to respect the service's rate limit.
    async fn create_bulk(&self) {
        println!();
        println!("Bulk account generation");
        separator();

        let domains = match self.client.list_domains().await {
            Ok(domains) => domains,
            Err(err) => {
                error_msg(&format!("Failed to fetch domains: {err}"));
                return;
            }
        };
        let Some(domain) = domains.first() else {
            error_msg("No domains available.");
            return;
        };
        info(&format!("Using domain: @{domain}"));

        let count = clamp_bulk_count(&read_line(&format!(
            "\n  Number of accounts (1-{BULK_MAX}): "
        )));
        println!("\nGenerating {count} account(s)...\n");

        let mut created = 0;
        for i in 0..count {
            let username = generate_username(USERNAME_LEN);
            match create_account_record(&self.client, &self.store, domain, &username).await {
                Ok(record) => {
                    created += 1;
                    println!("  [{created}/{count}] {}  |  {}", record.address, record.password);
                }
                Err(err) => println!("  [x] {username}@{domain}: {err}"),
            }

            if i < count - 1 {
                tokio::time::sleep(BULK_PAUSE).await;
            }
        }

        println!();
        separator();
        success(&format!("Created {created} of {count} account(s)"));
        info(&format!("Credentials saved to {}", self.store.path().display()));
    }

    /// Print every stored account with a readable creation timestamp.
    fn list_accounts(&self) {
        println!();
        println!("Saved accounts");
        separator();

        let accounts = self.store.load();
        if accounts.is_empty() {
            warn_msg("No saved accounts.");
            return;
        }

        for (i, account) in accounts.iter().enumerate() {
            println!(
                "  {:>3}. {:<35} {}  |  {}",
                i + 1,
                account.address,
                account.password,
                format_timestamp(&account.created_at),
            );
        }
        println!();
        separator();
        info(&format!("Total: {} account(s)", accounts.len()));
    }

    /// Authenticate to a selected account, list its messages, and optionally
    /// show one message in full.
    async fn check_inbox(&self) {
        println!();
        println!("Check inbox");
        separator();

        let accounts = self.store.load();
        if accounts.is_empty() {
            warn_msg("No saved accounts. Create one first.");
            return;
        }
        let Some(account) = select_account(&accounts) else {
            return;
        };

        println!("\nAuthenticating...");
        let token = match self.client.get_token(&account.address, &account.password).await {
            Ok(token) => token,
            Err(err) => {
                error_msg(&format!("Authentication failed: {err}"));
                return;
            }
        };

        println!("Loading messages...\n");
        let messages = match self.client.list_messages(&token).await {
            Ok(messages) => messages,
            Err(err) => {
                error_msg(&format!("Failed to fetch messages: {err}"));
                return;
            }
        };
        if messages.is_empty() {
            warn_msg("Inbox is empty.");
            return;
        }

        success(&format!("Messages found: {}", messages.len()));
        println!();
        for (i, msg) in messages.iter().enumerate() {
            let marker = if msg.seen { " " } else { "*" };
            println!(
                "  {}. {marker} {}",
                i + 1,
                truncate(subject_or_placeholder(&msg.subject), SUBJECT_WIDTH)
            );
            println!(
                "       From: {}  |  {}",
                sender_address(msg),
                format_timestamp(&msg.created_at)
            );
            if !msg.intro.is_empty() {
                println!("       {}...", truncate(&msg.intro, INTRO_WIDTH));
            }
            println!();
        }

        let choice = read_line("  Message number to read (Enter to go back): ");
        if choice.is_empty() {
            return;
        }
        let Some(index) = select_index(&choice, messages.len()) else {
            error_msg("Invalid number.");
            return;
        };
        match self.client.get_message(&token, &messages[index].id).await {
            Ok(detail) => print_message_detail(&detail),
            Err(err) => error_msg(&format!("Failed to read the message: {err}")),
        }
    }

    /// Poll a selected mailbox until new mail arrives, announcing each new
    /// message; Ctrl+C stops the loop and returns to the menu.
    async fn wait_for_mail(&self) {
        println!();
        println!("Wait for new mail");
        separator();

        let accounts = self.store.load();
        if accounts.is_empty() {
            warn_msg("No saved accounts.");
            return;
        }
        let Some(account) = select_account(&accounts) else {
            return;
        };

        let token = match self.client.get_token(&account.address, &account.password).await {
            Ok(token) => token,
            Err(err) => {
                error_msg(&format!("Authentication failed: {err}"));
                return;
            }
        };

        let mut baseline = match self.client.list_messages(&token).await {
            Ok(messages) => messages.len(),
            Err(err) => {
                error_msg(&format!("Failed to fetch messages: {err}"));
                0
            }
        };

        println!("\n  Mailbox: {}", account.address);
        println!("  Current messages: {baseline}");
        println!(
            "  Checking every {} seconds. Press Ctrl+C to stop.\n",
            POLL_INTERVAL.as_secs()
        );

        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });

        loop {
            let outcome =
                watch_for_new_message(&self.client, &token, baseline, POLL_INTERVAL, stop_rx.clone())
                    .await;
            let Some((message, count)) = outcome else {
                println!("\n\nStopped waiting.");
                return;
            };

            println!();
            success("New mail!");
            separator();
            println!("  From:    {}", sender_address(&message));
            println!("  Subject: {}", subject_or_placeholder(&message.subject));
            println!("  Preview: {}", truncate(&message.intro, 100));
            separator();

            if read_line("\n  Read the full message? (y/n): ").eq_ignore_ascii_case("y") {
                match self.client.get_message(&token, &message.id).await {
                    Ok(detail) => {
                        if let Some(text) = detail.text.filter(|t| !t.is_empty()) {
                            println!("\n{text}\n");
                        }
                    }
                    Err(err) => error_msg(&format!("Failed to read the message: {err}")),
                }
            }
            baseline = count;
        }
    }

    /// Delete a selected account remotely, then locally; on remote failure
    /// offer local removal only (the remote account stays orphaned).
    async fn delete_account(&self) {
        println!();
        println!("Delete account");
        separator();

        let mut accounts = self.store.load();
        if accounts.is_empty() {
            warn_msg("No saved accounts.");
            return;
        }

        println!("\nChoose an account to delete:");
        for (i, account) in accounts.iter().enumerate() {
            println!("  {}. {}", i + 1, account.address);
        }
        let input = read_line("\n  Account number: ");
        let Some(index) = select_index(&input, accounts.len()) else {
            error_msg("Invalid selection.");
            return;
        };
        let account = accounts[index].clone();

        let confirm = read_line(&format!("\n  Delete {}? (y/n): ", account.address));
        if !confirm.eq_ignore_ascii_case("y") {
            info("Cancelled.");
            return;
        }

        let deleted = match self.client.get_token(&account.address, &account.password).await {
            Ok(token) => match self.client.delete_account(&token, &account.id).await {
                Ok(deleted) => deleted,
                Err(err) => {
                    error_msg(&format!("Deletion failed: {err}"));
                    false
                }
            },
            Err(err) => {
                error_msg(&format!("Authentication failed: {err}"));
                false
            }
        };

        if deleted {
            accounts.remove(index);
            if let Err(err) = self.store.save(&accounts) {
                error_msg(&format!("Failed to update the store: {err}"));
                return;
            }
            success(&format!("Account {} deleted!", account.address));
        } else {
            error_msg("Could not delete the account on the server.");
            let remove_local = read_line("  Remove it from the local store anyway? (y/n): ");
            if remove_local.eq_ignore_ascii_case("y") {
                accounts.remove(index);
                if let Err(err) = self.store.save(&accounts) {
                    error_msg(&format!("Failed to update the store: {err}"));
                    return;
                }
                success("Removed from the local store.");
            }
        }
    }

    /// Write every stored account to a timestamped plain-text file.
    fn export_accounts(&self) {
        println!();
        println!("Export accounts");
        separator();

        let accounts = self.store.load();
        if accounts.is_empty() {
            warn_msg("No accounts to export.");
            return;
        }

        let now = Local::now();
        let filename = format!("accounts_export_{}.txt", now.format("%Y%m%d_%H%M%S"));
        let stamp = now.format("%d.%m.%Y %H:%M:%S").to_string();
        match write_export(&filename, &accounts, &stamp) {
            Ok(()) => {
                success(&format!("Exported to {filename}"));
                info(&format!("Total: {} account(s)", accounts.len()));
            }
            Err(err) => error_msg(&format!("Export failed: {err}")),
        }
    }
}

/// Create one mailbox with a random password and persist its credentials.
///
/// Shared by the single and bulk creation flows. The record carries the
/// service-assigned id and a local RFC 3339 creation timestamp; nothing is
/// persisted when creation fails.
pub async fn create_account_record(
    client: &Client,
    store: &Store,
    domain: &str,
    username: &str,
) -> Result<StoredAccount> {
    let address = format!("{username}@{domain}");
    let password = generate_password(PASSWORD_LEN);
    let account = client.create_account(&address, &password).await?;
    let record = StoredAccount {
        id: account.id,
        address,
        password,
        created_at: Local::now().to_rfc3339(),
    };
    store.append(record.clone())?;
    Ok(record)
}

/// Parse a requested bulk count: non-numeric input falls back to 3, numeric
/// input is clamped to [1, 20].
pub fn clamp_bulk_count(input: &str) -> usize {
    match input.trim().parse::<i64>() {
        Ok(count) => count.clamp(1, BULK_MAX as i64) as usize,
        Err(_) => BULK_DEFAULT,
    }
}

/// Poll the mailbox until its message count exceeds `baseline` or the stop
/// signal fires.
///
/// Sleeps `interval` between fetches; a failed fetch is reported and counts
/// as zero messages for that round. Returns the head of the latest fetch
/// (the newest message) together with the new count, or `None` once the
/// stop receiver observes `true`.
pub async fn watch_for_new_message(
    client: &Client,
    token: &str,
    baseline: usize,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) -> Option<(MessageSummary, usize)> {
    let mut checks = 0u64;
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = stop.wait_for(|stopped| *stopped) => return None,
        }

        checks += 1;
        let messages = match client.list_messages(token).await {
            Ok(messages) => messages,
            Err(err) => {
                error_msg(&format!("Fetch failed: {err}"));
                Vec::new()
            }
        };

        print!("\r  Check #{checks}... messages: {}    ", messages.len());
        let _ = io::stdout().flush();

        if messages.len() > baseline {
            if let Some(newest) = messages.first() {
                println!();
                return Some((newest.clone(), messages.len()));
            }
        }
    }
}

/// Print the stored accounts and read a 1-based selection; `None` aborts
/// the action after reporting the invalid input.
fn select_account(accounts: &[StoredAccount]) -> Option<&StoredAccount> {
    println!("\nChoose an account:");
    for (i, account) in accounts.iter().enumerate() {
        println!("  {}. {}", i + 1, account.address);
    }
    let input = read_line("\n  Account number: ");
    match select_index(&input, accounts.len()) {
        Some(index) => Some(&accounts[index]),
        None => {
            error_msg("Invalid selection.");
            None
        }
    }
}

/// Parse a 1-based index against a list length.
fn select_index(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(number) if (1..=len).contains(&number) => Some(number - 1),
        _ => None,
    }
}

fn print_message_detail(detail: &MessageDetail) {
    println!();
    separator();
    println!("  {}", subject_or_placeholder(&detail.subject));
    separator();
    let from = detail.from.clone().unwrap_or_default();
    println!("  From: {} <{}>", from.name, from.address);
    let recipients: Vec<&str> = detail.to.iter().map(|t| t.address.as_str()).collect();
    println!("  To:   {}", recipients.join(", "));
    separator();

    match detail.text.as_deref() {
        Some(text) if !text.is_empty() => println!("\n{text}\n"),
        _ => {
            if let Some(html) = detail.html.first() {
                info("This message is HTML-only.");
                println!("\n  {}\n", truncate(html, HTML_PREVIEW));
            } else {
                warn_msg("Empty message.");
            }
        }
    }

    if !detail.attachments.is_empty() {
        separator();
        println!("  Attachments ({}):", detail.attachments.len());
        for attachment in &detail.attachments {
            println!(
                "    - {} ({}, {} bytes)",
                attachment.filename, attachment.content_type, attachment.size
            );
        }
    }
}

fn write_export(path: &str, accounts: &[StoredAccount], stamp: &str) -> Result<()> {
    let mut out = String::new();
    out.push_str(&"=".repeat(60));
    out.push('\n');
    out.push_str("  Mail.tm account export\n");
    out.push_str(&format!("  Date: {stamp}\n"));
    out.push_str(&"=".repeat(60));
    out.push_str("\n\n");

    for (i, account) in accounts.iter().enumerate() {
        out.push_str(&format!("[{}]\n", i + 1));
        out.push_str(&format!("  Email:    {}\n", account.address));
        out.push_str(&format!("  Password: {}\n", account.password));
        out.push_str(&format!("  ID:       {}\n", account.id));
        out.push_str(&format!("  Created:  {}\n", account.created_at));
        out.push_str(&"-".repeat(40));
        out.push('\n');
    }

    out.push_str(&format!("\nTotal: {} account(s)\n", accounts.len()));
    std::fs::write(path, out)?;
    Ok(())
}

/// Render an RFC 3339 timestamp as `%d.%m.%Y %H:%M`, falling back to the
/// raw string when it does not parse.
fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn subject_or_placeholder(subject: &str) -> &str {
    if subject.is_empty() { "(no subject)" } else { subject }
}

fn sender_address(message: &MessageSummary) -> &str {
    message
        .from
        .as_ref()
        .map_or("unknown", |from| from.address.as_str())
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn print_menu() {
    println!();
    println!("  ========= MAIN MENU =========");
    println!("  1. Create a mailbox");
    println!("  2. Bulk generation");
    println!("  3. My accounts");
    println!("  4. Check inbox");
    println!("  5. Wait for new mail");
    println!("  6. Delete an account");
    println!("  7. Export to .txt");
    println!("  0. Exit");
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn separator() {
    println!("  {}", "-".repeat(62));
}

fn success(msg: &str) {
    println!("  [+] {msg}");
}

fn error_msg(msg: &str) {
    println!("  [x] {msg}");
}

fn warn_msg(msg: &str) {
    println!("  [!] {msg}");
}

fn info(msg: &str) {
    println!("  [i] {msg}");
}
