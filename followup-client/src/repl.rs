use chrono::NaiveDate;

use crate::picker::DateField;

pub const HELP: &str = "\
commands:
  show                 current customer
  call                 dial the current customer
  next                 move to the next customer
  select <n>           jump to customer n
  remarks <text>       set remarks
  follow-up | booking  open a date picker
  date <YYYY-MM-DD>    confirm the open picker
  cancel               close the open picker
  reasons              list reasons
  reason <n>           pick reason n
  not-coming <n>       pick reason n and mark as not coming
  save                 submit remarks
  reload               fetch the customer list again
  quit";

/// One line typed into the terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Show,
    Call,
    Next,
    Select(usize),
    Remarks(String),
    OpenPicker(DateField),
    Date(NaiveDate),
    Cancel,
    Reasons,
    Reason { index: usize, not_coming: bool },
    Save,
    Reload,
    Help,
    Quit,
}

fn position(what: &str, arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a {} number, got {:?}", what, arg)),
    }
}

/// Customer and reason numbers are 1-based on screen.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let input = match command {
        "show" | "" => Input::Show,
        "call" => Input::Call,
        "next" => Input::Next,
        "select" => Input::Select(position("customer", arg)?),
        "remarks" => Input::Remarks(arg.to_string()),
        "follow-up" => Input::OpenPicker(DateField::FollowUp),
        "booking" => Input::OpenPicker(DateField::Booking),
        "date" => Input::Date(
            NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map_err(|e| format!("bad date {:?}: {}", arg, e))?,
        ),
        "cancel" => Input::Cancel,
        "reasons" => Input::Reasons,
        "reason" => Input::Reason {
            index: position("reason", arg)?,
            not_coming: false,
        },
        "not-coming" => Input::Reason {
            index: position("reason", arg)?,
            not_coming: true,
        },
        "save" => Input::Save,
        "reload" => Input::Reload,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("unknown command {:?}, try help", other)),
    };
    Ok(input)
}
