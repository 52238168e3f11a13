//! Non-interactive walkthrough of the library API: create a mailbox, check
//! it once, and delete it again.
//!
//! Run with `cargo run --example demo`.

use mailtm_client::{Client, generate_password, generate_username};

#[tokio::main]
async fn main() -> Result<(), mailtm_client::Error> {
    let client = Client::new()?;

    let domains = client.list_domains().await?;
    let Some(domain) = domains.first() else {
        eprintln!("no active domains right now");
        return Ok(());
    };

    let address = format!("{}@{domain}", generate_username(10));
    let password = generate_password(16);
    let account = client.create_account(&address, &password).await?;
    println!("Created: {address} (id {})", account.id);

    let token = client.get_token(&address, &password).await?;
    let messages = client.list_messages(&token).await?;
    println!("Inbox holds {} message(s)", messages.len());
    for msg in &messages {
        let sender = msg.from.as_ref().map_or("unknown", |f| f.address.as_str());
        println!("  {sender}: {}", msg.subject);
    }

    client.delete_account(&token, &account.id).await?;
    println!("Mailbox deleted");
    Ok(())
}
