use tilechess_base::types;

pub trait Team {
    const TEAM: types::Team;
    type Inv: Team;
}

pub struct White;
pub struct Black;

impl Team for White {
    const TEAM: types::Team = types::Team::White;
    type Inv = Black;
}

impl Team for Black {
    const TEAM: types::Team = types::Team::Black;
    type Inv = White;
}
