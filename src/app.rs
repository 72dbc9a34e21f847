use std::io::{self, BufRead, Write};

use tracing::{debug, error};

use crate::config::AppConfig;
use crate::fileio::FileIO;
use crate::format;
use crate::menu::{parse_seat_number, MenuChoice, MENU};
use crate::style::{MessageKind, Style};
use crate::system::BookingSystem;

pub struct App {
    pub system: BookingSystem,
    pub file_io: FileIO,
    pub style: Style,
    pub should_quit: bool,
    category_hint: String,
}

impl App {
    pub fn new(config: &AppConfig, style: Style) -> Self {
        let category_hint = config
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            system: BookingSystem::new(&config.categories),
            file_io: FileIO::new(config.data_file.clone()),
            style,
            should_quit: false,
            category_hint,
        }
    }

    fn say<W: Write>(&self, out: &mut W, kind: MessageKind, text: &str) -> io::Result<()> {
        writeln!(out, "{}", self.style.paint(kind, text))
    }

    /// Print `label` and read one line. `None` means input is exhausted.
    ///
    /// Bytes that are not UTF-8 become replacement characters rather than
    /// ending the session.
    fn prompt<R: BufRead, W: Write>(
        input: &mut R,
        out: &mut W,
        label: &str,
    ) -> io::Result<Option<String>> {
        write!(out, "{}", label)?;
        out.flush()?;

        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Run the menu until Exit is chosen or input ends
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {

        while !self.should_quit {
            self.say(&mut out, MessageKind::Heading, MENU)?;
            let Some(line) = Self::prompt(&mut input, &mut out, "Choose an option: ")? else {
                writeln!(out)?;
                break;
            };

            match MenuChoice::parse(&line) {
                Some(choice) => {
                    debug!(?choice, "menu choice");
                    if !self.handle(choice, &mut input, &mut out)? {
                        writeln!(out)?;
                        break;
                    }
                }
                None => self.say(&mut out, MessageKind::Error, "Invalid option. Try again.")?,
            }
        }

        out.flush()
    }

    /// Carry out one menu choice. Returns `false` if input ran out mid-prompt.
    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<bool> {
        match choice {
            MenuChoice::Reserve => {
                let Some(name) = Self::prompt(input, out, "Enter customer name: ")? else {
                    return Ok(false);
                };
                let label = format!("Enter category ({}): ", self.category_hint);
                let Some(category) = Self::prompt(input, out, &label)? else {
                    return Ok(false);
                };

                match self.system.reserve(name.trim(), category.trim()) {
                    Ok(booking) => {
                        let msg = format!(
                            "Seat {} in category {} reserved for {}",
                            booking.seat_number, booking.category, booking.customer
                        );
                        self.say(out, MessageKind::Success, &msg)?;
                    }
                    Err(e) => self.say(out, MessageKind::Error, &e.to_string())?,
                }
            }
            MenuChoice::Cancel => {
                let Some(answer) = Self::prompt(input, out, "Enter seat number to cancel: ")? else {
                    return Ok(false);
                };
                let Some(number) = parse_seat_number(&answer) else {
                    self.say(out, MessageKind::Error, "Invalid seat number.")?;
                    return Ok(true);
                };

                match self.system.cancel(number) {
                    Ok(_) => {
                        let msg = format!("Reservation for seat {} cancelled.", number);
                        self.say(out, MessageKind::Success, &msg)?;
                    }
                    Err(e) => self.say(out, MessageKind::Error, &e.to_string())?,
                }
            }
            MenuChoice::UndoBooking => match self.system.undo_last_reservation() {
                Ok(undone) => {
                    let msg = format!("Undo booking: Seat {} is now available.", undone.seat_number);
                    self.say(out, MessageKind::Success, &msg)?;
                }
                Err(e) => self.say(out, MessageKind::Error, &e.to_string())?,
            },
            MenuChoice::UndoCancellation => match self.system.undo_last_cancellation() {
                Ok(undone) => {
                    let msg = format!(
                        "Undo cancellation: Seat {} is now reserved again for {}.",
                        undone.seat_number, undone.customer
                    );
                    self.say(out, MessageKind::Success, &msg)?;
                }
                Err(e) => self.say(out, MessageKind::Error, &e.to_string())?,
            },
            MenuChoice::Lookup => {
                let Some(answer) = Self::prompt(input, out, "Enter seat number to lookup: ")? else {
                    return Ok(false);
                };
                let Some(number) = parse_seat_number(&answer) else {
                    self.say(out, MessageKind::Error, "Invalid seat number.")?;
                    return Ok(true);
                };

                match self.system.lookup(number) {
                    Ok(seat) => self.say(out, MessageKind::Info, &seat.to_string())?,
                    Err(e) => self.say(out, MessageKind::Error, &e.to_string())?,
                }
            }
            MenuChoice::ListSeats => {
                let table = format::seat_table(self.system.list_seats());
                self.say(out, MessageKind::Info, &table)?;
            }
            MenuChoice::CategorySummary => {
                let summary = format::category_lines(&self.system.category_summary());
                self.say(out, MessageKind::Info, &summary)?;
            }
            MenuChoice::Save => match self.system.save(&self.file_io) {
                Ok(_) => {
                    let msg = format!("Data saved to {}", self.file_io.file_name());
                    self.say(out, MessageKind::Success, &msg)?;
                }
                Err(e) => {
                    error!(error = %e, "save failed");
                    self.say(out, MessageKind::Error, &format!("Error saving data: {}", e))?;
                }
            },
            MenuChoice::Load => match self.system.load(&self.file_io) {
                Ok(count) => {
                    let msg = format!(
                        "Data loaded from {}\nTotal seats loaded: {}",
                        self.file_io.file_name(),
                        count
                    );
                    self.say(out, MessageKind::Success, &msg)?;
                }
                Err(e) => {
                    error!(error = %e, "load failed");
                    let msg = format!(
                        "Error loading data from file '{}': {}",
                        self.file_io.file_name(),
                        e
                    );
                    self.say(out, MessageKind::Error, &msg)?;
                }
            },
            MenuChoice::Exit => {
                self.say(out, MessageKind::Info, "Exiting system. Goodbye!")?;
                self.should_quit = true;
            }
        }
        Ok(true)
    }
}
