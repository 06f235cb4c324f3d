use std::{cmp::max, str::FromStr};

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, line_ending, multispace0},
    combinator::{all_consuming, map, map_res, value},
    multi::{fold_many0, many0, many1},
    sequence::{separated_pair, terminated},
    IResult,
};
use num::Unsigned;

use crate::{
    direction::Rotate,
    grid::{Grid, Material},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Forward(usize),
    Turn(Rotate),
}

const fn is_int_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn unsigned<N: Unsigned + FromStr>(input: &str) -> IResult<&str, N> {
    map_res(take_while1(is_int_digit), str::parse)(input)
}

fn row(input: &str) -> IResult<&str, Vec<Material>> {
    use Material::*;

    terminated(
        many1(alt((
            value(Outside, char(' ')),
            value(Open, char('.')),
            value(Wall, char('#')),
        ))),
        line_ending,
    )(input)
}

pub fn grid(input: &str) -> IResult<&str, Grid> {
    map(
        fold_many0(
            row,
            || (0, Vec::new()),
            |(mut max_len, mut vec), cr| {
                max_len = max(max_len, cr.len());
                vec.push(cr);

                (max_len, vec)
            },
        ),
        |(dim_x, vec)| Grid::new(vec, dim_x),
    )(input)
}

pub fn commands(input: &str) -> IResult<&str, Vec<Command>> {
    use Command::*;
    use Rotate::*;

    terminated(
        many0(alt((
            map(unsigned, Forward),
            value(Turn(Left), char('L')),
            value(Turn(Right), char('R')),
        ))),
        multispace0,
    )(input)
}

/// The map, a blank line, and the path to follow.
pub fn map_input(input: &str) -> IResult<&str, (Grid, Vec<Command>)> {
    all_consuming(terminated(
        separated_pair(grid, line_ending, commands),
        multispace0,
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SAMPLE;

    #[test]
    fn path_is_split_into_commands() {
        use Command::*;
        use Rotate::*;

        let (rest, cmds) = commands("10R5L5R10L4R5L5\n").unwrap();

        assert!(rest.is_empty());
        assert_eq!(
            cmds,
            [
                Forward(10),
                Turn(Right),
                Forward(5),
                Turn(Left),
                Forward(5),
                Turn(Right),
                Forward(10),
                Turn(Left),
                Forward(4),
                Turn(Right),
                Forward(5),
                Turn(Left),
                Forward(5)
            ]
        );
    }

    #[test]
    fn rows_are_padded() {
        let (_, g) = grid("  .#\n.\n").unwrap();

        assert_eq!(g.dims(), (4, 2));
        assert_eq!(g[(3, 0)], Material::Wall);
        assert_eq!(g[(3, 1)], Material::Outside);
    }

    #[test]
    fn whole_input() {
        let (g, cmds) = map_input(SAMPLE).unwrap().1;

        assert_eq!(g.dims(), (16, 12));
        assert_eq!(cmds.len(), 13);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(map_input("..x.\n\n10R\n").is_err());
        assert!(map_input("....\n\n10X5\n").is_err());
    }
}
