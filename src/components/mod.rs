pub mod day_view;
pub mod event_form;
pub mod event_list;
pub mod month_view;
pub mod status_bar;
pub mod week_view;
pub mod year_view;

pub use day_view::DayView;
pub use event_form::EventForm;
pub use event_list::EventList;
pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use week_view::WeekView;
pub use year_view::YearView;
