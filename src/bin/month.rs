use std::sync::Arc;

use month_planner::client::Client;
use month_planner::CalendarController;

/// Prints the current month, with the public holidays of a country (`UA` by default, or the first argument)
#[tokio::main]
async fn main() {
    env_logger::init();

    let client = match Client::from_config() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid API URL: {}", err);
            return;
        }
    };
    let mut controller = CalendarController::new(Arc::new(client));
    controller.start().await;

    if let Some(country) = std::env::args().nth(1) {
        if let Err(err) = controller.select_country(&country).await {
            log::error!("Unable to fetch the holidays of {}: {}", country, err);
        }
    }

    match controller.render() {
        Err(err) => log::error!("Unable to render {}: {}", controller.title(), err),
        Ok(cells) => {
            let title = format!("{} ({})", controller.title(), controller.country());
            month_planner::utils::print_month(&title, &cells);
        },
    }
}
