use colored::Colorize;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use thiserror::Error;

// =============================================================================
// Single-instance resource: in-memory user database
//
// The classic version hides the connection behind a process-wide static.
// Here the one-per-process guarantee comes from construction discipline
// instead: `main` opens exactly one `UserDirectory` and lends it to the
// driver loop, so every caller shares the same connection without any
// global mutable state.
// =============================================================================

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
}

pub struct UserDirectory {
    connection: Connection,
}

impl UserDirectory {
    /// One-time setup: open the in-memory database and create the schema.
    /// The store lives exactly as long as the process.
    pub fn open() -> Result<Self, DirectoryError> {
        let connection = Connection::open_in_memory()?;
        connection.execute(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                email TEXT NOT NULL
            )",
            [],
        )?;
        Ok(UserDirectory { connection })
    }

    /// The shared handle. Every call returns the same connection because
    /// only one directory is ever constructed.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn add_user(&self, username: &str, email: &str) -> Result<(), DirectoryError> {
        self.connection.execute(
            "INSERT INTO users (username, email) VALUES (?1, ?2)",
            rusqlite::params![username, email],
        )?;
        Ok(())
    }

    /// All users, in insertion order.
    pub fn users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, username, email FROM users ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
            })
        })?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }
        Ok(users)
    }
}

// =============================================================================
// Interactive driver
// =============================================================================

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W, directory: &UserDirectory) -> io::Result<()> {
    loop {
        writeln!(out, "\n--- Database Manager ---")?;
        writeln!(out, "1. Add User")?;
        writeln!(out, "2. View Users")?;
        writeln!(out, "3. Exit")?;

        let Some(choice) = prompt(&mut input, out, "Choose an option: ")? else {
            writeln!(out, "Exiting the system.")?;
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(username) = prompt(&mut input, out, "Enter username: ")? else {
                    break;
                };
                let Some(email) = prompt(&mut input, out, "Enter email: ")? else {
                    break;
                };
                match directory.add_user(&username, &email) {
                    Ok(()) => writeln!(out, "{}", "User added successfully.".green())?,
                    Err(err) => writeln!(out, "{}", format!("Could not add user: {err}").red())?,
                }
            }
            "2" => match directory.users() {
                Ok(users) => {
                    writeln!(out, "\n{}", "Current Users:".bold())?;
                    for user in users {
                        writeln!(
                            out,
                            "ID: {}, Username: {}, Email: {}",
                            user.id, user.username, user.email
                        )?;
                    }
                }
                Err(err) => writeln!(out, "{}", format!("Could not list users: {err}").red())?,
            },
            "3" => {
                writeln!(out, "Exiting the system.")?;
                break;
            }
            _ => writeln!(out, "{}", "Invalid option. Please try again.".red())?,
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let directory = match UserDirectory::open() {
        Ok(directory) => directory,
        Err(err) => {
            eprintln!("{}", format!("Failed to open the database: {err}").red());
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    run(stdin.lock(), &mut io::stdout(), &directory)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_handle_is_shared() {
        let directory = UserDirectory::open().unwrap();
        let first = directory.connection() as *const Connection;
        let second = directory.connection() as *const Connection;
        assert_eq!(first, second);
    }

    #[test]
    fn test_add_then_list_reflects_record_once() {
        let directory = UserDirectory::open().unwrap();
        directory.add_user("ada", "ada@example.com").unwrap();

        let users = directory.users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ada");
        assert_eq!(users[0].email, "ada@example.com");
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let directory = UserDirectory::open().unwrap();
        directory.add_user("ada", "ada@example.com").unwrap();
        directory.add_user("brian", "brian@example.com").unwrap();
        directory.add_user("grace", "grace@example.com").unwrap();

        let names: Vec<String> = directory
            .users()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["ada", "brian", "grace"]);
    }

    #[test]
    fn test_fresh_directory_starts_empty() {
        let directory = UserDirectory::open().unwrap();
        assert!(directory.users().unwrap().is_empty());
    }

    #[test]
    fn test_driver_add_and_view() {
        colored::control::set_override(false);
        let directory = UserDirectory::open().unwrap();
        let input = Cursor::new("1\nada\nada@example.com\n2\n3\n");
        let mut out = Vec::new();
        run(input, &mut out, &directory).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("User added successfully."));
        assert!(output.contains("ID: 1, Username: ada, Email: ada@example.com"));
        assert!(output.contains("Exiting the system."));
    }

    #[test]
    fn test_driver_rejects_unknown_option() {
        colored::control::set_override(false);
        let directory = UserDirectory::open().unwrap();
        let input = Cursor::new("9\n3\n");
        let mut out = Vec::new();
        run(input, &mut out, &directory).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Invalid option. Please try again."));
    }
}
