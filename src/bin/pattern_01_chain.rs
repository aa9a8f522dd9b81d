use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::Duration;

// =============================================================================
// Chain of Responsibility: expense approval
//
// Different levels of authority (Employee, Manager, Director) approve an
// expense up to a fixed limit. A request above the limit is passed to the
// next handler in the chain; a request above every limit is unresolved.
// =============================================================================

/// How long a handler waits before passing a request along.
///
/// The pause is purely presentational, so it is injected: the interactive
/// driver paces itself for a human reader, tests run with no pause.
#[derive(Debug, Clone, Copy)]
pub struct Pacing(Duration);

impl Pacing {
    pub fn none() -> Self {
        Pacing(Duration::ZERO)
    }

    pub fn human() -> Self {
        Pacing(Duration::from_secs(1))
    }

    fn pause(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// Outcome of submitting an expense to the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Approved { title: &'static str },
    Unresolved,
}

/// One link in the approval chain.
///
/// Concrete approvers only supply a title, a limit, and their successor;
/// the walk itself is a provided method, so every level delegates the same
/// way. The chain is acyclic by construction: each node owns its successor.
pub trait ExpenseApprover {
    fn title(&self) -> &'static str;
    fn limit(&self) -> f64;
    fn successor(&self) -> Option<&dyn ExpenseApprover>;

    fn handle(&self, amount: f64, pacing: Pacing, out: &mut dyn Write) -> io::Result<Decision> {
        if amount <= self.limit() {
            writeln!(
                out,
                "{}: {}",
                self.title(),
                format!("Approved expense of ${amount:.2}").green()
            )?;
            return Ok(Decision::Approved {
                title: self.title(),
            });
        }

        match self.successor() {
            Some(next) => {
                writeln!(
                    out,
                    "{}: Cannot approve expense of ${amount:.2}. Passing to the next handler...",
                    self.title()
                )?;
                pacing.pause();
                next.handle(amount, pacing, out)
            }
            None => {
                writeln!(
                    out,
                    "{}: {}",
                    self.title(),
                    format!("Cannot approve expense of ${amount:.2}. No more handlers available.")
                        .red()
                )?;
                Ok(Decision::Unresolved)
            }
        }
    }
}

pub struct Employee {
    next: Option<Box<dyn ExpenseApprover>>,
}

pub struct Manager {
    next: Option<Box<dyn ExpenseApprover>>,
}

pub struct Director {
    next: Option<Box<dyn ExpenseApprover>>,
}

impl Employee {
    pub fn new(next: Option<Box<dyn ExpenseApprover>>) -> Self {
        Employee { next }
    }
}

impl Manager {
    pub fn new(next: Option<Box<dyn ExpenseApprover>>) -> Self {
        Manager { next }
    }
}

impl Director {
    pub fn new(next: Option<Box<dyn ExpenseApprover>>) -> Self {
        Director { next }
    }
}

impl ExpenseApprover for Employee {
    fn title(&self) -> &'static str {
        "Employee"
    }

    fn limit(&self) -> f64 {
        100.0
    }

    fn successor(&self) -> Option<&dyn ExpenseApprover> {
        self.next.as_deref()
    }
}

impl ExpenseApprover for Manager {
    fn title(&self) -> &'static str {
        "Manager"
    }

    fn limit(&self) -> f64 {
        1_000.0
    }

    fn successor(&self) -> Option<&dyn ExpenseApprover> {
        self.next.as_deref()
    }
}

impl ExpenseApprover for Director {
    fn title(&self) -> &'static str {
        "Director"
    }

    fn limit(&self) -> f64 {
        10_000.0
    }

    fn successor(&self) -> Option<&dyn ExpenseApprover> {
        self.next.as_deref()
    }
}

/// Build the standard Employee -> Manager -> Director chain.
///
/// Limits are strictly increasing, so exactly one level approves any
/// amount within the top limit.
pub fn approval_chain() -> Employee {
    let director = Director::new(None);
    let manager = Manager::new(Some(Box::new(director)));
    Employee::new(Some(Box::new(manager)))
}

// =============================================================================
// Interactive driver
// =============================================================================

pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W, pacing: Pacing) -> io::Result<()> {
    let chain = approval_chain();

    loop {
        writeln!(out, "\n--- Expense Approval System ---")?;
        writeln!(out, "Enter the amount of expense or 'exit' to quit:")?;
        write!(out, "Expense amount: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like "exit"
            writeln!(out, "Exiting the system.")?;
            break;
        }

        let entry = line.trim();
        if entry.eq_ignore_ascii_case("exit") {
            writeln!(out, "Exiting the system.")?;
            break;
        }

        match entry.parse::<f64>() {
            Ok(amount) if amount.is_finite() => {
                chain.handle(amount, pacing, out)?;
            }
            _ => {
                writeln!(
                    out,
                    "{}",
                    "Invalid amount. Please enter a numeric value.".red()
                )?;
            }
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    run(stdin.lock(), &mut io::stdout(), Pacing::human())
}

// =============================================================================
// Tests
// =============================================================================
