/// A fixed-width text table. The profiler's report sections are printed with this instead of printing during computation.
pub struct TextTable {
	padding: usize,
	header: Vec<String>,
	rows: Vec<Vec<String>>,
}

impl TextTable {
	pub fn new(header: Vec<String>) -> Self {
		Self {
			padding: 1,
			header,
			rows: Vec::new(),
		}
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		assert_eq!(row.len(), self.header.len());
		self.rows.push(row);
	}
}

impl std::fmt::Display for TextTable {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		// each column is as wide as its widest value, header included
		let mut column_widths: Vec<usize> = self.header.iter().map(|header| header.len()).collect();
		for row in self.rows.iter() {
			for (column_width, value) in column_widths.iter_mut().zip(row.iter()) {
				*column_width = usize::max(*column_width, value.len());
			}
		}
		let line = Line {
			column_widths: &column_widths,
			padding: self.padding,
		};
		let header = Row {
			column_widths: &column_widths,
			padding: self.padding,
			values: &self.header,
		};
		writeln!(f, "{}", header)?;
		writeln!(f, "{}", line)?;
		for row in self.rows.iter() {
			let row = Row {
				column_widths: &column_widths,
				padding: self.padding,
				values: row,
			};
			writeln!(f, "{}", row)?;
		}
		Ok(())
	}
}

struct Line<'a> {
	column_widths: &'a [usize],
	padding: usize,
}

impl<'a> std::fmt::Display for Line<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for column_width in self.column_widths.iter() {
			for _ in 0..column_width + 2 * self.padding {
				write!(f, "-")?;
			}
			write!(f, "|")?;
		}
		Ok(())
	}
}

struct Row<'a> {
	column_widths: &'a [usize],
	padding: usize,
	values: &'a [String],
}

impl<'a> std::fmt::Display for Row<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for (column_width, value) in self.column_widths.iter().zip(self.values) {
			for _ in 0..self.padding {
				write!(f, " ")?;
			}
			write!(f, "{}", value)?;
			for _ in 0..column_width + self.padding - value.len() {
				write!(f, " ")?;
			}
			write!(f, "|")?;
		}
		Ok(())
	}
}

#[test]
fn test_text_table_display() {
	let mut table = TextTable::new(vec!["column".to_owned(), "null_count".to_owned()]);
	table.add_row(vec!["age".to_owned(), "0".to_owned()]);
	table.add_row(vec!["name".to_owned(), "12".to_owned()]);
	let expected = "\
| column | null_count |\n\
|--------|------------|\n\
| age    | 0          |\n\
| name   | 12         |\n";
	assert_eq!(table.to_string(), expected);
}
