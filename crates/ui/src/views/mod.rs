mod quest;

pub use quest::QuestView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
