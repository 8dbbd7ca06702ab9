pub mod aggregator;
pub mod audit;
pub mod champion_classes;
pub mod pick_ban;
pub mod player;
pub mod rating;
