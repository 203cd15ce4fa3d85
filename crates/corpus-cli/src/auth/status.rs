use color_eyre::eyre::Result;
use corpus_core::Client;

pub(crate) fn status(client: &Client) -> Result<()> {
    let Some(user) = client.current_user() else {
        println!("Not logged in");
        return Ok(());
    };

    println!("Logged in as {} ({})", user.name, user.phone);
    println!("Email: {}", user.email);
    if let Some(last_login) = &user.last_login_at {
        println!("Last login: {last_login}");
    }
    if let Some(count) = user.contributions_count {
        println!("Contributions: {count}");
    }
    Ok(())
}
