//! Line commands for the interactive browse loop

use crate::dashboard::DashboardView;
use crate::fetcher::FetchTicket;
use crate::filter::{CategorySelection, StatusFilter};
use std::str::FromStr;

/// One operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Go to the next page
    Next,
    /// Go to the previous page
    Previous,
    /// Set the search text, possibly empty
    Search(String),
    /// Set the category selection
    Category(CategorySelection),
    /// Set the status selection
    Status(StatusFilter),
    /// Set or clear the seller id filter
    Seller(Option<i64>),
    /// Set or clear the product id filter
    Product(Option<i64>),
    /// Clear search, category and status
    Refresh,
    /// Re-fetch the current page
    Reload,
    /// Print the dashboard
    Show,
    /// Print the command list
    Help,
    /// Leave the loop
    Quit,
}

/// Usage text for the browse loop
pub const HELP: &str = "\
commands:
  next | n                 next page
  prev | p                 previous page
  search <text>            filter by name (empty clears)
  category <id|all>        filter by category
  status <all|active|inactive|pending>
  seller <id|->            filter by seller id
  product <id|->           filter by product id
  refresh                  clear search, category and status
  reload                   re-fetch the current page
  show                     print the dashboard
  help                     print this list
  quit | q                 exit";

impl BrowseCommand {
    /// Apply the command to `view`
    ///
    /// Returns the ticket of a page fetch the caller must run, if the
    /// command started one.
    pub fn apply(self, view: &mut DashboardView) -> Option<FetchTicket> {
        match self {
            Self::Next => view.request_next(),
            Self::Previous => view.request_previous(),
            Self::Reload => view.begin_fetch(),
            Self::Search(search) => {
                view.set_search(search);
                None
            }
            Self::Category(category) => {
                view.set_category(category);
                None
            }
            Self::Status(status) => {
                view.set_status(status);
                None
            }
            Self::Seller(seller_id) => {
                view.set_seller(seller_id);
                None
            }
            Self::Product(product_id) => {
                view.set_product(product_id);
                None
            }
            Self::Refresh => {
                view.refresh();
                None
            }
            Self::Show | Self::Help | Self::Quit => None,
        }
    }
}

fn parse_id(kind: &str, arg: &str) -> Result<Option<i64>, String> {
    let arg = arg.trim();
    if arg.is_empty() || arg == "-" {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| format!("invalid {kind} id '{arg}'"))
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = line
            .trim_start()
            .split_once(' ')
            .unwrap_or((line.trim(), ""));

        match word {
            "next" | "n" => Ok(Self::Next),
            "prev" | "previous" | "p" => Ok(Self::Previous),
            // The rest of the line is kept verbatim, spaces included.
            "search" => Ok(Self::Search(rest.to_string())),
            "category" => Ok(Self::Category(
                rest.parse().unwrap_or(CategorySelection::All),
            )),
            "status" => rest.parse().map(Self::Status),
            "seller" => parse_id("seller", rest).map(Self::Seller),
            "product" => parse_id("product", rest).map(Self::Product),
            "refresh" => Ok(Self::Refresh),
            "reload" => Ok(Self::Reload),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}', type 'help'")),
        }
    }
}
