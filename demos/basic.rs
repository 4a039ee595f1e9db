//! Basic example demonstrating the Insightly API client.
//!
//! Run with:
//! ```
//! INSIGHTLY_API_KEY=your-key cargo run --example basic
//! ```

use insightly::{Contact, Get, InsightlyClient, List, SearchFilter};

#[tokio::main]
async fn main() -> insightly::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Insightly client...");
    let client = InsightlyClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of contacts
    println!("\n--- Listing Contacts (first page) ---");
    let page = Contact::list_page(&client, 0, 10).await?;
    println!("Found {} contacts (more: {})", page.len(), page.has_more);

    for contact in &page {
        println!(
            "  - {} ({})",
            contact.full_name(),
            contact.contact_id.unwrap_or_default()
        );
    }

    // Get a specific contact (using the first one from the list)
    if let Some(id) = page.items.first().and_then(|c| c.contact_id) {
        println!("\n--- Getting Contact Details ---");
        let contact = Contact::get(&client, id).await?;
        println!("Contact: {}", contact.full_name());
        println!("  Email: {}", contact.email_address.as_deref().unwrap_or("-"));
        println!("  Links: {}", contact.links.len());
        for field in &contact.custom_fields {
            println!("  {} = {}", field.custom_field_id, field.field_value);
        }

        // Find other contacts with the same last name
        if let Some(last_name) = &contact.last_name {
            let filter = SearchFilter::new().with("last_name", last_name);
            let namesakes = client.list_contacts(Some(&filter)).await?;
            println!("  Contacts named {}: {}", last_name, namesakes.len());
        }
    }

    // Read-only lists
    println!("\n--- Account ---");
    let users = client.list_users().await?;
    println!("Users: {}", users.len());
    for relationship in client.list_relationships().await? {
        println!(
            "  Relationship {}: {} / {}",
            relationship.relationship_id.unwrap_or_default(),
            relationship.forward_title.as_deref().unwrap_or("?"),
            relationship.reverse_title.as_deref().unwrap_or("?")
        );
    }

    Ok(())
}
