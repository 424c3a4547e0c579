pub mod answers;
pub mod games;
pub mod players;
pub mod questions;
pub mod round_scores;
pub mod rounds;
pub mod votes;

pub use answers::Entity as Answers;
pub use answers::Model as Answer;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use questions::Entity as Questions;
pub use questions::Model as Question;
pub use round_scores::Entity as RoundScores;
pub use round_scores::Model as RoundScore;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
pub use votes::Entity as Votes;
pub use votes::Model as Vote;
