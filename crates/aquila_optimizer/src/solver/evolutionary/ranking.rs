use crate::pareto::{objectives::Axis, solution::Solution};

/// Fast non-dominated sort: assign every individual its Pareto rank, front
/// 0 being the non-dominated set.
pub(crate) fn assign_ranks(population: &mut [Solution]) {
    let n = population.len();
    if n == 0 {
        return;
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            if population[i].dominates(&population[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if population[j].dominates(&population[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut current_front: Vec<usize> = Vec::new();
    for (i, &count) in domination_count.iter().enumerate() {
        if count == 0 {
            population[i].rank = 0;
            current_front.push(i);
        }
    }

    let mut front_index = 0;
    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &i in &current_front {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    population[j].rank = front_index + 1;
                    next_front.push(j);
                }
            }
        }
        front_index += 1;
        current_front = next_front;
    }
}

/// Crowding distance per rank class: boundary members on any objective get
/// `+∞`, interior members sum normalized neighbor gaps; a zero-range
/// objective contributes nothing.
pub(crate) fn assign_crowding(population: &mut [Solution]) {
    for solution in population.iter_mut() {
        solution.crowding_distance = 0.0;
    }

    let Some(max_rank) = population.iter().map(Solution::rank).max() else {
        return;
    };

    for rank in 0..=max_rank {
        let mut class: Vec<usize> = (0..population.len())
            .filter(|&i| population[i].rank == rank)
            .collect();
        if class.is_empty() {
            continue;
        }

        if class.len() <= 2 {
            for &i in &class {
                population[i].crowding_distance = f64::INFINITY;
            }
            continue;
        }

        for axis in Axis::ALL {
            class.sort_by(|&a, &b| {
                population[a]
                    .objectives()
                    .project(axis)
                    .total_cmp(&population[b].objectives().project(axis))
            });

            let first = class[0];
            let last = class[class.len() - 1];
            population[first].crowding_distance = f64::INFINITY;
            population[last].crowding_distance = f64::INFINITY;

            let range = population[last].objectives().project(axis)
                - population[first].objectives().project(axis);
            if range == 0.0 {
                continue;
            }

            for k in 1..class.len() - 1 {
                let gap = population[class[k + 1]].objectives().project(axis)
                    - population[class[k - 1]].objectives().project(axis);
                population[class[k]].crowding_distance += gap / range;
            }
        }
    }
}
