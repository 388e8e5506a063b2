//! Aggregate statistics over the student list

use std::collections::BTreeMap;
use std::fmt;

use crate::record::Student;

/// GPA range a student falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GpaBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl GpaBand {
    pub fn of(gpa: f64) -> Self {
        if gpa >= 3.5 {
            GpaBand::Excellent
        } else if gpa >= 3.0 {
            GpaBand::Good
        } else if gpa >= 2.0 {
            GpaBand::Average
        } else {
            GpaBand::Poor
        }
    }
}

impl fmt::Display for GpaBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GpaBand::Excellent => "Excellent (3.5 and above)",
            GpaBand::Good => "Good (3.0 to 3.5)",
            GpaBand::Average => "Average (2.0 to 3.0)",
            GpaBand::Poor => "Poor (below 2.0)",
        };
        f.write_str(label)
    }
}

/// Summary of a non-empty student list
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub average_gpa: f64,
    pub highest_gpa: Student,
    pub lowest_gpa: Student,
    pub average_age: f64,
    pub gpa_bands: BTreeMap<GpaBand, usize>,
    pub students_per_course: BTreeMap<String, usize>,
    pub average_gpa_per_course: BTreeMap<String, f64>,
}

impl Statistics {
    /// Compute statistics; `None` for an empty list
    ///
    /// Ties for highest/lowest GPA go to the first student in list order.
    pub fn from_students(students: &[Student]) -> Option<Self> {
        let first = students.first()?;
        let count = students.len();

        let mut highest = first;
        let mut lowest = first;
        let mut gpa_sum = 0.0;
        let mut age_sum = 0u64;
        let mut gpa_bands = BTreeMap::new();
        let mut course_totals: BTreeMap<String, (usize, f64)> = BTreeMap::new();

        for student in students {
            if student.gpa > highest.gpa {
                highest = student;
            }
            if student.gpa < lowest.gpa {
                lowest = student;
            }
            gpa_sum += student.gpa;
            age_sum += u64::from(student.age);
            *gpa_bands.entry(GpaBand::of(student.gpa)).or_insert(0) += 1;

            let totals = course_totals.entry(student.course.clone()).or_insert((0, 0.0));
            totals.0 += 1;
            totals.1 += student.gpa;
        }

        let students_per_course = course_totals
            .iter()
            .map(|(course, (n, _))| (course.clone(), *n))
            .collect();
        let average_gpa_per_course = course_totals
            .into_iter()
            .map(|(course, (n, total))| (course, total / n as f64))
            .collect();

        Some(Self {
            count,
            average_gpa: gpa_sum / count as f64,
            highest_gpa: highest.clone(),
            lowest_gpa: lowest.clone(),
            average_age: age_sum as f64 / count as f64,
            gpa_bands,
            students_per_course,
            average_gpa_per_course,
        })
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Students: {}", self.count)?;
        writeln!(f, "Average GPA: {:.2}", self.average_gpa)?;
        writeln!(
            f,
            "Highest GPA: {:.2} ({})",
            self.highest_gpa.gpa, self.highest_gpa.name
        )?;
        writeln!(
            f,
            "Lowest GPA: {:.2} ({})",
            self.lowest_gpa.gpa, self.lowest_gpa.name
        )?;
        writeln!(f, "Average Age: {:.1} years", self.average_age)?;

        writeln!(f, "\nNumber of students in different GPA ranges:")?;
        for (band, n) in &self.gpa_bands {
            writeln!(f, "{}: {} students", band, n)?;
        }

        writeln!(f, "\n--- Course-wise Distribution ---\n")?;
        for (course, n) in &self.students_per_course {
            writeln!(f, "{}: {} students", course, n)?;
        }

        writeln!(f, "\nAverage GPA by Course:")?;
        for (course, gpa) in &self.average_gpa_per_course {
            writeln!(f, "{}: {:.2}", course, gpa)?;
        }
        Ok(())
    }
}
