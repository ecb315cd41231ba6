use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use blogify_client::{BlogifyClient, Category, ClientError, Comment, Page, Post, Reaction, User};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const SESSION_FILE: &str = ".blogify_session";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

#[derive(Debug, Parser)]
#[command(name = "blogify-cli", version, about = "CLI клиент для Blogify API")]
struct Cli {
    /// Адрес бэкенда (иначе BLOGIFY_API_URL или значение по умолчанию).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход пользователя.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Регистрация пользователя.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Подтверждение пароля; по умолчанию совпадает с --password.
        #[arg(long)]
        password_confirm: Option<String>,
    },
    /// Завершение сессии (удаляет сохранённый токен).
    Logout,
    /// Список постов.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 5)]
        page_size: u32,
    },
    /// Поиск постов по заголовку или тегу.
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Пост по id вместе с комментариями.
    Show {
        #[arg(long)]
        id: i64,
    },
    /// Список категорий (с признаком подписки, если есть сессия).
    Categories,
    /// Посты выбранной категории.
    Category {
        #[arg(long)]
        id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Комментарий к посту (требует сессию).
    Comment {
        #[arg(long)]
        post_id: i64,
        #[arg(long)]
        content: String,
    },
    /// Ответ на комментарий (требует сессию).
    Reply {
        #[arg(long)]
        comment_id: i64,
        #[arg(long)]
        content: String,
    },
    /// Лайк поста (требует сессию).
    Like {
        #[arg(long)]
        id: i64,
    },
    /// Дизлайк поста (требует сессию).
    Dislike {
        #[arg(long)]
        id: i64,
    },
    /// Подписка на категорию (требует сессию).
    Subscribe {
        #[arg(long)]
        id: i64,
    },
    /// Отписка от категории (требует сессию).
    Unsubscribe {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    token: String,
    username: String,
    #[serde(default)]
    is_admin: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var("BLOGIFY_API_URL").ok());
    let mut client = BlogifyClient::new(server);

    if let Some(session) = load_session().context("не удалось прочитать .blogify_session")? {
        client.set_token(session.token);
    }

    match cli.command {
        Command::Login { username, password } => {
            let session = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_session(&session.token, &session.user)
                .context("не удалось сохранить сессию")?;
            print_auth("Вход выполнен", &session.user);
        }
        Command::Signup {
            username,
            email,
            password,
            password_confirm,
        } => {
            let confirm = password_confirm.unwrap_or_else(|| password.clone());
            let session = client
                .signup(&username, &email, &password, &confirm)
                .await
                .map_err(map_client_error)?;
            persist_session(&session.token, &session.user)
                .context("не удалось сохранить сессию")?;
            print_auth("Регистрация успешна", &session.user);
        }
        Command::Logout => {
            clear_session().context("не удалось удалить сессию")?;
            println!("Сессия завершена");
        }
        Command::List { page, page_size } => {
            let result = client
                .list_posts(page, page_size)
                .await
                .map_err(map_client_error)?;
            print_page(page, &result);
        }
        Command::Search { query, page } => {
            let result = client
                .search_posts(&query, page)
                .await
                .map_err(map_client_error)?;
            print_page(page, &result);
        }
        Command::Show { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            let comments = client.list_comments(id).await.map_err(map_client_error)?;
            print_post(&client, &post);
            print_comments(&comments);
        }
        Command::Categories => {
            let categories = client.categories().await.map_err(map_client_error)?;
            print_categories(&categories);
        }
        Command::Category { id, page } => {
            let result = client
                .category_posts(id, page)
                .await
                .map_err(map_client_error)?;
            print_page(page, &result);
        }
        Command::Comment { post_id, content } => {
            let comment = client
                .create_comment(post_id, &content)
                .await
                .map_err(map_client_error)?;
            println!("Комментарий создан: id={}", comment.id);
        }
        Command::Reply {
            comment_id,
            content,
        } => match client.reply_to_comment(comment_id, &content).await {
            Ok(reply) => println!("Ответ создан: id={}", reply.id),
            // Конфликт «один ответ» не фатален: сообщаем и выходим без ошибки.
            Err(ClientError::DuplicateReply) => {
                println!("{}", blogify_client::DUPLICATE_REPLY_MESSAGE)
            }
            Err(err) => return Err(map_client_error(err)),
        },
        Command::Like { id } => {
            let post = client
                .react_to_post(id, Reaction::Like)
                .await
                .map_err(map_client_error)?;
            print_reactions(&post);
        }
        Command::Dislike { id } => {
            let post = client
                .react_to_post(id, Reaction::Dislike)
                .await
                .map_err(map_client_error)?;
            print_reactions(&post);
        }
        Command::Subscribe { id } => {
            let message = client.subscribe(id).await.map_err(map_client_error)?;
            println!("{message}");
        }
        Command::Unsubscribe { id } => {
            let message = client.unsubscribe(id).await.map_err(map_client_error)?;
            println!("{message}");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("BLOGIFY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_session_content(raw: &str) -> Option<Session> {
    serde_json::from_str::<Session>(raw.trim()).ok()
}

fn load_session() -> io::Result<Option<Session>> {
    if !Path::new(SESSION_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(SESSION_FILE)?;
    Ok(parse_session_content(&raw))
}

fn persist_session(token: &str, user: &User) -> Result<()> {
    let session = Session {
        token: token.to_string(),
        username: user.username.clone(),
        is_admin: user.is_admin,
    };
    let raw = serde_json::to_string(&session)?;
    fs::write(SESSION_FILE, raw)?;
    Ok(())
}

fn clear_session() -> io::Result<()> {
    if Path::new(SESSION_FILE).exists() {
        fs::remove_file(SESSION_FILE)?;
    }
    Ok(())
}

fn map_client_error(err: ClientError) -> anyhow::Error {
    let message = match err {
        ClientError::Unauthorized => {
            "требуется авторизация: выполните `blogify-cli login ...` или `blogify-cli signup ...`"
                .to_string()
        }
        ClientError::NotFound => "ресурс не найден".to_string(),
        ClientError::DuplicateReply => blogify_client::DUPLICATE_REPLY_MESSAGE.to_string(),
        ClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        ClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_auth(title: &str, user: &User) {
    println!("{title}");
    println!("username: {}", user.username);
    println!("is_admin: {}", user.is_admin);
}

fn print_page(page: u32, result: &Page<Post>) {
    println!(
        "Страница {page}: постов {} (всего {})",
        result.results.len(),
        result.count
    );

    for post in &result.results {
        let date = post
            .publish_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "- [{}] {} (автор: {}, {date})",
            post.id, post.title, post.author.username
        );
    }

    println!(
        "next: {}, previous: {}",
        if result.has_next() { "есть" } else { "нет" },
        if result.has_previous() { "есть" } else { "нет" }
    );
}

fn print_post(client: &BlogifyClient, post: &Post) {
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("author: {}", post.author.username);
    if let Some(category) = &post.category {
        println!("category: {}", category.name);
    }
    if !post.tags.is_empty() {
        let tags: Vec<&str> = post.tags.iter().map(|t| t.name.as_str()).collect();
        println!("tags: {}", tags.join(", "));
    }
    if let Some(image) = &post.image {
        println!("image: {}", client.image_url(image));
    }
    println!("likes: {} / dislikes: {}", post.likes, post.dislikes);
    println!();
    println!("{}", post.content);
    println!();
}

fn print_reactions(post: &Post) {
    println!(
        "likes: {} (мой: {}), dislikes: {} (мой: {})",
        post.likes, post.liked_by_me, post.dislikes, post.disliked_by_me
    );
}

fn print_comments(comments: &[Comment]) {
    let top_level: Vec<&Comment> = comments.iter().filter(|c| c.is_top_level()).collect();
    println!("Комментариев: {}", top_level.len());

    for comment in top_level {
        let user = comment.user.as_deref().unwrap_or("Unknown");
        println!("- [{}] {user}: {}", comment.id, comment.content);
        for reply in &comment.replies {
            let user = reply.user.as_deref().unwrap_or("Unknown");
            println!("    ответ [{}] {user}: {}", reply.id, reply.content);
        }
    }
}

fn print_categories(categories: &[Category]) {
    println!("Категорий: {}", categories.len());
    for category in categories {
        let mark = if category.subscribed { "*" } else { " " };
        println!("{mark} [{}] {}", category.id, category.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://blog.example.com".to_string());
        assert_eq!(s, "https://blog.example.com");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8000".to_string());
        assert_eq!(s, "http://127.0.0.1:8000");
    }

    #[test]
    fn resolve_server_prefers_flag_over_env() {
        let server = resolve_server(
            Some("localhost:9000".to_string()),
            Some("http://env.example.com".to_string()),
        );
        assert_eq!(server, "http://localhost:9000");
    }

    #[test]
    fn resolve_server_falls_back_to_env_then_default() {
        let server = resolve_server(None, Some("env.example.com".to_string()));
        assert_eq!(server, "http://env.example.com");

        let server = resolve_server(None, None);
        assert_eq!(server, DEFAULT_SERVER);
    }

    #[test]
    fn parse_session_content_reads_json() {
        let raw = r#"{"token": "abc.def.ghi", "username": "alice", "is_admin": true}"#;
        let session = parse_session_content(raw).expect("session should parse");
        assert_eq!(session.token, "abc.def.ghi");
        assert_eq!(session.username, "alice");
        assert!(session.is_admin);
    }

    #[test]
    fn parse_session_content_defaults_is_admin() {
        let raw = r#"{"token": "t", "username": "bob"}"#;
        let session = parse_session_content(raw).expect("session should parse");
        assert!(!session.is_admin);
    }

    #[test]
    fn parse_session_content_rejects_garbage() {
        assert!(parse_session_content("{not-json}").is_none());
        assert!(parse_session_content("").is_none());
    }
}
