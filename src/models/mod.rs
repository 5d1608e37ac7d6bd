mod appointment;
mod customer;
mod employee;
mod service;
mod tally;

pub use appointment::{
    Appointment, AppointmentServiceRow, AppointmentStatus, NewAppointment, UpdateAppointment,
};
pub use customer::{Customer, Gender, NewCustomer, UpdateCustomer};
pub use employee::{Employee, NewEmployee, UpdateEmployee};
pub use service::{NewService, Service, UpdateService};
pub use tally::{NewTallyRecord, PaymentMethod, PaymentStatus, TallyRecord, UpdateTallyRecord};
