mod checklist;
mod common;
mod conditions;
mod confidence;
mod gate;
mod risk;
