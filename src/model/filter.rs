use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriState {
    #[default]
    Ignore,
    Include,
    Exclude,
}

impl TriState {
    /// Value written after the option id in an advanced search query.
    pub fn token(&self) -> &'static str {
        match self {
            TriState::Ignore => "=",
            TriState::Include => "=in",
            TriState::Exclude => "=ex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub name: String,
    /// Site internal id, used as the query parameter key
    pub id: String,
    pub state: TriState,
}

impl FilterOption {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_owned(),
            id: id.to_owned(),
            state: TriState::Ignore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    Category(Vec<FilterOption>),
    Genres(Vec<FilterOption>),
}

impl Filter {
    pub fn title(&self) -> &'static str {
        match self {
            Filter::Category(_) => "Category",
            Filter::Genres(_) => "Genres",
        }
    }

    pub fn options(&self) -> &[FilterOption] {
        match self {
            Filter::Category(options) | Filter::Genres(options) => options,
        }
    }

    pub fn options_mut(&mut self) -> &mut Vec<FilterOption> {
        match self {
            Filter::Category(options) | Filter::Genres(options) => options,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterList(pub Vec<Filter>);

impl FilterList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.0.iter()
    }

    /// Every option that takes part in the query, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = &FilterOption> {
        self.iter()
            .flat_map(|filter| filter.options())
            .filter(|option| option.state != TriState::Ignore)
    }

    /// Sets the state of the option with `id`, returns false if no option has that id.
    pub fn set_state(&mut self, id: &str, state: TriState) -> bool {
        let option = self
            .0
            .iter_mut()
            .flat_map(|filter| filter.options_mut().iter_mut())
            .find(|option| option.id == id);

        match option {
            Some(option) => {
                option.state = state;
                true
            }
            None => false,
        }
    }

    /// Same as [FilterList::set_state] but looks the option up by its label.
    pub fn set_state_by_name(&mut self, name: &str, state: TriState) -> bool {
        let option = self
            .0
            .iter_mut()
            .flat_map(|filter| filter.options_mut().iter_mut())
            .find(|option| option.name == name);

        match option {
            Some(option) => {
                option.state = state;
                true
            }
            None => false,
        }
    }
}
